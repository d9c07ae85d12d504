pub mod logout;

use crate::AppState;
use axum::routing::post;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for session endpoints that need a token (mounted at /api/auth)
pub fn router() -> Router<AppState> {
    Router::new().route("/logout", post(logout::logout))
}

#[derive(OpenApi)]
#[openapi(paths(logout::logout))]
pub struct ApiDoc;
