pub mod list;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/books endpoints (mounted at /api/books)
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list::list_books))
}

#[derive(OpenApi)]
#[openapi(
    paths(list::list_books),
    components(schemas(list::ListBooksResponse, list::BookResponse))
)]
pub struct ApiDoc;
