use super::list::RecipeSummary;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::store::DieselCatalog;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Form, Json};
use larder_core::{run_search, ChartRenderer, SearchForm, SearchOutcome, SearchParams};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use utoipa::ToSchema;

/// Search form fields. Every field is optional; blank means "no constraint".
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct SearchRequest {
    /// Case-insensitive substring of the recipe name (at most 120 characters)
    pub recipe_name: Option<String>,
    /// Comma-separated ingredient terms; a recipe matches if any term does
    pub ingredients: Option<String>,
    /// Whole minutes, 1 to 500
    pub max_cook_time: Option<String>,
    /// "", "Easy", "Medium" or "Hard"
    pub difficulty: Option<String>,
    /// "", "#1" (difficulty bar), "#2" (cook time pie) or "#3" (growth line)
    pub chart_type: Option<String>,
    /// List every recipe when present, whatever its value
    pub show_all: Option<String>,
}

impl From<SearchRequest> for SearchParams {
    fn from(req: SearchRequest) -> Self {
        SearchParams {
            recipe_name: req.recipe_name,
            ingredients: req.ingredients,
            max_cook_time: req.max_cook_time,
            difficulty: req.difficulty,
            chart_type: req.chart_type,
            show_all: req.show_all,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SearchFormResponse {
    pub recipe_name: String,
    pub ingredients: String,
    pub max_cook_time: String,
    pub difficulty: String,
    pub chart_type: String,
    /// Field name to validation messages; empty when the form is valid
    pub errors: BTreeMap<String, Vec<String>>,
}

impl From<SearchForm> for SearchFormResponse {
    fn from(form: SearchForm) -> Self {
        SearchFormResponse {
            recipe_name: form.recipe_name,
            ingredients: form.ingredients,
            max_cook_time: form.max_cook_time,
            difficulty: form.difficulty,
            chart_type: form.chart_type,
            errors: form.errors,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LegendEntryResponse {
    pub label: String,
    pub value: usize,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SearchResponse {
    pub form: SearchFormResponse,
    /// `null` when no search ran, `[]` when one ran and matched nothing
    pub recipes: Option<Vec<RecipeSummary>>,
    /// Base64 PNG, or `null` when no chart was drawn
    pub chart: Option<String>,
    pub chart_title: Option<String>,
    pub chart_legend: Vec<LegendEntryResponse>,
}

impl From<SearchOutcome> for SearchResponse {
    fn from(outcome: SearchOutcome) -> Self {
        let (chart, chart_title, chart_legend) = match outcome.chart {
            Some(c) => (
                Some(c.image_base64),
                Some(c.kind.label().to_string()),
                c.legend
                    .into_iter()
                    .map(|e| LegendEntryResponse {
                        label: e.label,
                        value: e.value,
                        color: e.color,
                    })
                    .collect(),
            ),
            None => (None, None, Vec::new()),
        };

        SearchResponse {
            form: outcome.form.into(),
            recipes: outcome
                .recipes
                .map(|rs| rs.iter().map(RecipeSummary::from).collect()),
            chart,
            chart_title,
            chart_legend,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/recipes/search",
    tag = "recipes",
    responses(
        (status = 200, description = "Empty search form; no search runs", body = SearchResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn search_page(AuthUser(_user): AuthUser) -> impl IntoResponse {
    Json(SearchResponse::from(SearchOutcome {
        form: SearchForm::default(),
        recipes: None,
        chart: None,
    }))
}

#[utoipa::path(
    post,
    path = "/api/recipes/search",
    tag = "recipes",
    request_body(content = SearchRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Search results, validation errors, and the optional chart", body = SearchResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Catalog could not be read", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn search_recipes(
    AuthUser(_user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    State(charts): State<Arc<ChartRenderer>>,
    Form(req): Form<SearchRequest>,
) -> impl IntoResponse {
    let params = SearchParams::from(req);
    let mut conn = get_conn!(pool);
    let mut catalog = DieselCatalog::new(&mut conn);

    match run_search(&params, &mut catalog, &charts) {
        Ok(outcome) => (StatusCode::OK, Json(SearchResponse::from(outcome))).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "recipe search failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to search recipes".to_string(),
                }),
            )
                .into_response()
        }
    }
}
