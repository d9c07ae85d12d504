use super::PeopleParams;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::bookshop;
use crate::db::DbPool;
use crate::get_conn;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use larder_core::Salesperson;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SalespersonResponse {
    pub id: i32,
    pub username: String,
    pub name: String,
    pub bio: String,
}

impl From<Salesperson> for SalespersonResponse {
    fn from(person: Salesperson) -> Self {
        SalespersonResponse {
            id: person.id,
            username: person.username,
            name: person.name,
            bio: person.bio,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListSalespersonsResponse {
    pub salespersons: Vec<SalespersonResponse>,
}

#[utoipa::path(
    get,
    path = "/api/salespersons",
    tag = "salespersons",
    params(PeopleParams),
    responses(
        (status = 200, description = "Salespeople matching by username or name", body = ListSalespersonsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_salespersons(
    AuthUser(_user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<PeopleParams>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    match bookshop::list_salespersons(&mut conn, params.text()) {
        Ok(people) => Json(ListSalespersonsResponse {
            salespersons: people.into_iter().map(SalespersonResponse::from).collect(),
        })
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to list salespersons");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch salespersons".to_string(),
                }),
            )
                .into_response()
        }
    }
}
