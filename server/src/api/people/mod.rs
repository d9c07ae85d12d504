pub mod customers;
pub mod salespersons;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use utoipa::{IntoParams, OpenApi};

/// Mounted at /api/customers
pub fn customers_router() -> Router<AppState> {
    Router::new().route("/", get(customers::list_customers))
}

/// Mounted at /api/salespersons
pub fn salespersons_router() -> Router<AppState> {
    Router::new().route("/", get(salespersons::list_salespersons))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct PeopleParams {
    /// Case-insensitive substring to search for
    pub q: Option<String>,
}

impl PeopleParams {
    fn text(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(customers::list_customers, salespersons::list_salespersons),
    components(schemas(
        customers::CustomerResponse,
        customers::ListCustomersResponse,
        salespersons::SalespersonResponse,
        salespersons::ListSalespersonsResponse,
    ))
)]
pub struct ApiDoc;
