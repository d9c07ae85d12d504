use crate::api::ErrorResponse;
use crate::auth::{delete_session, BearerToken};
use crate::db::DbPool;
use crate::get_conn;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "auth",
    responses(
        (status = 204, description = "Session ended"),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn logout(
    State(pool): State<Arc<DbPool>>,
    BearerToken(token): BearerToken,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    match delete_session(&mut conn, &token) {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to delete session");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to end session".to_string(),
                }),
            )
                .into_response()
        }
    }
}
