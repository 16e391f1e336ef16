//! Book catalog routes.
//!
//! ISBN uniqueness is answered with 409 before any write, matching the user
//! routes' username handling.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use librarium_catalog::Book;
use librarium_core::BookId;

use crate::app::dto::{BookPayload, BookResponse};
use crate::app::errors::{domain_error_to_response, json_error};
use crate::app::services::AppServices;
use crate::context::RequestPrincipal;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_books).post(create_book))
        .route("/:id", get(get_book).put(update_book).delete(delete_book))
}

pub async fn list_books(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let books = services.books.list().await;
    let body: Vec<BookResponse> = books.iter().map(BookResponse::from).collect();
    Json(body).into_response()
}

pub async fn get_book(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: BookId = match id.parse() {
        Ok(v) => v,
        Err(e) => return domain_error_to_response(e),
    };

    match services.books.find_by_id(id).await {
        Some(book) => Json(BookResponse::from(&book)).into_response(),
        None => json_error(StatusCode::NOT_FOUND, "not_found", "book not found"),
    }
}

pub async fn create_book(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<BookPayload>,
) -> axum::response::Response {
    if services.books.find_by_isbn(&body.isbn).await.is_some() {
        return json_error(StatusCode::CONFLICT, "conflict", "isbn already in catalog");
    }

    let book = Book::new(body.isbn, body.title, body.author, body.excerpt);
    let response = BookResponse::from(&book);
    services.books.insert(book).await;

    (StatusCode::CREATED, Json(response)).into_response()
}

pub async fn update_book(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<BookPayload>,
) -> axum::response::Response {
    let id: BookId = match id.parse() {
        Ok(v) => v,
        Err(e) => return domain_error_to_response(e),
    };

    if services.books.find_by_id(id).await.is_none() {
        return json_error(StatusCode::NOT_FOUND, "not_found", "book not found");
    }

    // The new ISBN must not belong to another book.
    if let Some(other) = services.books.find_by_isbn(&body.isbn).await {
        if other.id != id {
            return json_error(StatusCode::CONFLICT, "conflict", "isbn already in catalog");
        }
    }

    let book = Book {
        id,
        isbn: body.isbn,
        title: body.title,
        author: body.author,
        excerpt: body.excerpt,
    };
    let response = BookResponse::from(&book);
    services.books.update(book).await;

    Json(response).into_response()
}

pub async fn delete_book(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<RequestPrincipal>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: BookId = match id.parse() {
        Ok(v) => v,
        Err(e) => return domain_error_to_response(e),
    };

    if !services.books.remove(id).await {
        return json_error(StatusCode::NOT_FOUND, "not_found", "book not found");
    }

    tracing::info!(actor = %actor.id(), book = %id, "book deleted");
    StatusCode::NO_CONTENT.into_response()
}
