//! Book inventory handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use bookstore_core::BookId;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppJson};
use crate::models::{Book, BookPatch, NewBook};
use crate::state::AppState;

/// Payload for `POST /addBook`.
///
/// Fields are optional at the deserialization layer so validation can report
/// every missing field at once instead of failing on the first.
#[derive(Debug, Deserialize)]
pub struct AddBookRequest {
    bookname: Option<String>,
    author: Option<String>,
    quantity: Option<i64>,
    price: Option<f64>,
}

/// Payload for `PUT /books/{id}`. Absent fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateBookRequest {
    bookname: Option<String>,
    author: Option<String>,
    quantity: Option<i64>,
    price: Option<f64>,
}

/// Response body for `DELETE /books/{id}`.
#[derive(Debug, Serialize)]
pub struct DeleteBookResponse {
    message: &'static str,
}

/// `POST /addBook` - validate and store a new book.
pub async fn add_book(
    State(state): State<AppState>,
    AppJson(payload): AppJson<AddBookRequest>,
) -> Result<(StatusCode, Json<Book>), AppError> {
    let new_book = NewBook::new(
        payload.bookname,
        payload.author,
        payload.quantity,
        payload.price,
    )?;
    let book = state.books().add(new_book).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// `GET /books` - list every stored book.
pub async fn list_books(State(state): State<AppState>) -> Result<Json<Vec<Book>>, AppError> {
    let books = state.books().list().await?;
    Ok(Json(books))
}

/// `PUT /books/{id}` - apply a partial update and return the updated record.
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateBookRequest>,
) -> Result<Json<Book>, AppError> {
    // Malformed ids are rejected before the store is consulted
    let id = BookId::parse(&id).map_err(|_| AppError::InvalidBookId)?;
    let patch = BookPatch {
        bookname: payload.bookname,
        author: payload.author,
        quantity: payload.quantity,
        price: payload.price,
    };

    let book = state
        .books()
        .update(id, patch)
        .await?
        .ok_or(AppError::BookNotFound)?;
    Ok(Json(book))
}

/// `DELETE /books/{id}` - remove a book.
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteBookResponse>, AppError> {
    let id = BookId::parse(&id).map_err(|_| AppError::InvalidBookId)?;

    if state.books().delete(id).await? {
        Ok(Json(DeleteBookResponse {
            message: "Book deleted successfully",
        }))
    } else {
        Err(AppError::BookNotFound)
    }
}
