use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::store::DieselCatalog;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use larder_core::{Recipe, RecipeCatalog};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeSummary {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub cook_time_minutes: u32,
    pub difficulty: Option<String>,
    pub image: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<&Recipe> for RecipeSummary {
    fn from(recipe: &Recipe) -> Self {
        RecipeSummary {
            id: recipe.id,
            name: recipe.name.clone(),
            description: recipe.description.clone(),
            cook_time_minutes: recipe.cook_time_minutes,
            difficulty: recipe.difficulty.map(|d| d.to_string()),
            image: recipe.image.clone(),
            created_at: recipe.created_at,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListRecipesParams {
    /// Number of items to return (default: all)
    pub limit: Option<usize>,
    /// Number of items to skip (default: 0)
    pub offset: Option<usize>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListRecipesResponse {
    pub recipes: Vec<RecipeSummary>,
    /// Size of the whole catalog, ignoring limit and offset
    pub total: usize,
}

#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    params(ListRecipesParams),
    responses(
        (status = 200, description = "Every recipe, ordered by name", body = ListRecipesResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_recipes(
    AuthUser(_user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<ListRecipesParams>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let recipes = match DieselCatalog::new(&mut conn).all_recipes() {
        Ok(r) => r,
        Err(e) => {
            tracing::error!(error = %e, "failed to list recipes");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch recipes".to_string(),
                }),
            )
                .into_response();
        }
    };

    let total = recipes.len();
    let offset = params.offset.unwrap_or(0);
    let limit = params.limit.unwrap_or(total);

    let recipes = recipes
        .iter()
        .skip(offset)
        .take(limit)
        .map(RecipeSummary::from)
        .collect();

    Json(ListRecipesResponse { recipes, total }).into_response()
}
