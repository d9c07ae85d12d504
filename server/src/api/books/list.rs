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
use larder_core::{Book, BookQuery};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookResponse {
    pub id: i32,
    pub name: String,
    pub author_name: String,
    /// In US dollars
    pub price: f64,
    /// One of classic, romantic, comic, fantasy, horror, educational
    pub genre: String,
    pub genre_label: String,
    /// One of hardcover, ebook, audiobook
    pub book_type: String,
    pub book_type_label: String,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        BookResponse {
            id: book.id,
            genre: book.genre.as_str().to_string(),
            genre_label: book.genre.label().to_string(),
            book_type: book.book_type.as_str().to_string(),
            book_type_label: book.book_type.label().to_string(),
            name: book.name,
            author_name: book.author_name,
            price: book.price,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListBooksParams {
    /// Matches name or author, case-insensitively
    pub q: Option<String>,
    pub genre: Option<String>,
    pub book_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListBooksResponse {
    pub books: Vec<BookResponse>,
}

#[utoipa::path(
    get,
    path = "/api/books",
    tag = "books",
    params(ListBooksParams),
    responses(
        (status = 200, description = "Matching books, ordered by name", body = ListBooksResponse),
        (status = 400, description = "Unknown genre or book type", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_books(
    AuthUser(_user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<ListBooksParams>,
) -> impl IntoResponse {
    let query = match BookQuery::parse(
        params.q.as_deref(),
        params.genre.as_deref(),
        params.book_type.as_deref(),
    ) {
        Ok(q) => q,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!(
                        "Select a valid choice. {} is not one of the available choices.",
                        e.value
                    ),
                }),
            )
                .into_response();
        }
    };

    let mut conn = get_conn!(pool);

    match bookshop::list_books(&mut conn, &query) {
        Ok(books) => Json(ListBooksResponse {
            books: books.into_iter().map(BookResponse::from).collect(),
        })
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to list books");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch books".to_string(),
                }),
            )
                .into_response()
        }
    }
}
