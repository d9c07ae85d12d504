pub mod chart;
pub mod error;
pub mod models;
pub mod quantity;
pub mod sales;
pub mod search;
pub mod seed;

pub use chart::{Chart, ChartConfig, ChartKind, ChartRenderer, LegendEntry};
pub use error::{ChartError, SeedError};
pub use models::{Difficulty, Ingredient, Recipe, RecipeIngredient};
pub use quantity::{ingredient_line, pretty_quantity};
pub use sales::{Book, BookQuery, BookType, Customer, Genre, Salesperson, UnknownChoice};
pub use search::{run_search, RecipeCatalog, SearchForm, SearchOutcome, SearchParams};
pub use seed::{resolve_ingredient_name, SeedFile};
