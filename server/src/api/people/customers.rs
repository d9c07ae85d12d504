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
use larder_core::Customer;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CustomerResponse {
    pub id: i32,
    pub name: String,
    pub notes: String,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        CustomerResponse {
            id: customer.id,
            name: customer.name,
            notes: customer.notes,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListCustomersResponse {
    pub customers: Vec<CustomerResponse>,
}

#[utoipa::path(
    get,
    path = "/api/customers",
    tag = "customers",
    params(PeopleParams),
    responses(
        (status = 200, description = "Customers whose name matches, ordered by name", body = ListCustomersResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_customers(
    AuthUser(_user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<PeopleParams>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    match bookshop::list_customers(&mut conn, params.text()) {
        Ok(customers) => Json(ListCustomersResponse {
            customers: customers.into_iter().map(CustomerResponse::from).collect(),
        })
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to list customers");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch customers".to_string(),
                }),
            )
                .into_response()
        }
    }
}
