pub mod get;
pub mod list;
pub mod search;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/recipes endpoints (mounted at /api/recipes)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_recipes))
        .route(
            "/search",
            get(search::search_page).post(search::search_recipes),
        )
        .route("/{id}", get(get::get_recipe))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_recipes,
        get::get_recipe,
        search::search_page,
        search::search_recipes,
    ),
    components(schemas(
        list::ListRecipesResponse,
        list::RecipeSummary,
        get::RecipeResponse,
        get::IngredientLineResponse,
        search::SearchRequest,
        search::SearchFormResponse,
        search::LegendEntryResponse,
        search::SearchResponse,
    ))
)]
pub struct ApiDoc;
