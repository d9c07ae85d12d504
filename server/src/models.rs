use chrono::NaiveDateTime;
use diesel::prelude::*;
use larder_core::{
    Book, BookType, Customer, Difficulty, Genre, Ingredient, Recipe, RecipeIngredient, Salesperson,
};

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[allow(dead_code)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::sessions)]
pub struct NewSession<'a> {
    pub user_id: i32,
    pub token_hash: &'a str,
    pub expires_at: NaiveDateTime,
}

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RecipeRow {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub cook_time_minutes: i32,
    pub difficulty: Option<String>,
    pub image: Option<String>,
    pub created_at: NaiveDateTime,
}

impl RecipeRow {
    /// Attach the loaded ingredient lines. Unknown difficulty text is treated
    /// as unset; the table constraint keeps that from happening in practice.
    pub fn into_recipe(self, ingredients: Vec<RecipeIngredient>) -> Recipe {
        Recipe {
            id: self.id,
            name: self.name,
            description: self.description,
            cook_time_minutes: u32::try_from(self.cook_time_minutes).unwrap_or_default(),
            difficulty: self
                .difficulty
                .as_deref()
                .and_then(|d| d.parse::<Difficulty>().ok()),
            created_at: Some(self.created_at.and_utc()),
            image: self.image,
            ingredients,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipes)]
pub struct NewRecipe<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub cook_time_minutes: i32,
    pub difficulty: Option<&'a str>,
    pub image: Option<&'a str>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::ingredients)]
pub struct NewIngredient<'a> {
    pub name: &'a str,
}

/// One ingredient line of a recipe as loaded by a join.
#[derive(Queryable, Debug)]
pub struct IngredientLineRow {
    pub recipe_id: i32,
    pub ingredient_id: i32,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

impl IngredientLineRow {
    pub fn into_recipe_ingredient(self) -> RecipeIngredient {
        RecipeIngredient {
            ingredient: Ingredient {
                id: self.ingredient_id,
                name: self.name,
            },
            quantity: self.quantity,
            unit: self.unit,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipe_ingredients)]
pub struct NewRecipeIngredient<'a> {
    pub recipe_id: i32,
    pub ingredient_id: i32,
    pub quantity: f64,
    pub unit: &'a str,
}

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::books)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BookRow {
    pub id: i32,
    pub name: String,
    pub author_name: String,
    pub price: f64,
    pub genre: String,
    pub book_type: String,
}

impl BookRow {
    /// The table constraints only admit known codes; anything else reads as the default.
    pub fn into_book(self) -> Book {
        Book {
            id: self.id,
            name: self.name,
            author_name: self.author_name,
            price: self.price,
            genre: self.genre.parse::<Genre>().unwrap_or_default(),
            book_type: self.book_type.parse::<BookType>().unwrap_or_default(),
        }
    }
}

/// Leaving `genre` or `book_type` unset lets the column default apply.
#[derive(Insertable)]
#[diesel(table_name = crate::schema::books)]
pub struct NewBook<'a> {
    pub name: &'a str,
    pub author_name: &'a str,
    pub price: f64,
    pub genre: Option<&'a str>,
    pub book_type: Option<&'a str>,
}

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::customers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CustomerRow {
    pub id: i32,
    pub name: String,
    pub notes: String,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            id: row.id,
            name: row.name,
            notes: row.notes,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::customers)]
pub struct NewCustomer<'a> {
    pub name: &'a str,
    pub notes: &'a str,
}

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::salespersons)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SalespersonRow {
    pub id: i32,
    pub username: String,
    pub name: String,
    pub bio: String,
}

impl From<SalespersonRow> for Salesperson {
    fn from(row: SalespersonRow) -> Self {
        Salesperson {
            id: row.id,
            username: row.username,
            name: row.name,
            bio: row.bio,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::salespersons)]
pub struct NewSalesperson<'a> {
    pub username: &'a str,
    pub name: &'a str,
    pub bio: &'a str,
}
