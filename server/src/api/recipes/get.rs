use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::store::load_recipe;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use larder_core::{ingredient_line, pretty_quantity, RecipeIngredient};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IngredientLineResponse {
    pub id: i32,
    pub name: String,
    pub quantity: f64,
    /// Quantity as a mixed fraction, e.g. "2 ½"; empty when zero
    pub quantity_display: String,
    pub unit: String,
    /// "Name: quantity unit", ready to show
    pub display: String,
}

impl From<&RecipeIngredient> for IngredientLineResponse {
    fn from(item: &RecipeIngredient) -> Self {
        IngredientLineResponse {
            id: item.ingredient.id,
            name: item.ingredient.name.clone(),
            quantity: item.quantity,
            quantity_display: pretty_quantity(Some(item.quantity)),
            unit: item.unit.clone(),
            display: ingredient_line(&item.ingredient.name, Some(item.quantity), &item.unit),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub cook_time_minutes: u32,
    pub difficulty: Option<String>,
    pub image: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub ingredients: Vec<IngredientLineResponse>,
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe details", body = RecipeResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_recipe(
    AuthUser(_user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let recipe = match load_recipe(&mut conn, id) {
        Ok(Some(r)) => r,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "Recipe not found".to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, recipe_id = id, "failed to fetch recipe");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch recipe".to_string(),
                }),
            )
                .into_response();
        }
    };

    let response = RecipeResponse {
        id: recipe.id,
        name: recipe.name,
        description: recipe.description,
        cook_time_minutes: recipe.cook_time_minutes,
        difficulty: recipe.difficulty.map(|d| d.to_string()),
        image: recipe.image,
        created_at: recipe.created_at,
        ingredients: recipe.ingredients.iter().map(Into::into).collect(),
    };

    (StatusCode::OK, Json(response)).into_response()
}
