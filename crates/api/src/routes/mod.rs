//! HTTP route handlers for the bookstore API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /            - Welcome banner
//! GET    /health      - Health check
//!
//! # Books
//! POST   /addBook     - Create a book
//! GET    /books       - List all books
//! PUT    /books/{id}  - Update a book
//! DELETE /books/{id}  - Delete a book
//!
//! # Files
//! POST   /upload      - Store one file (multipart field `file`)
//! ```

pub mod books;
pub mod upload;

use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the book inventory routes router.
pub fn book_routes() -> Router<AppState> {
    Router::new()
        .route("/addBook", post(books::add_book))
        .route("/books", get(books::list_books))
        .route(
            "/books/{id}",
            put(books::update_book).delete(books::delete_book),
        )
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Welcome banner
        .route("/", get(welcome))
        // Book inventory
        .merge(book_routes())
        // File upload; the body limit is lifted so large files pass through
        .route(
            "/upload",
            post(upload::upload_file).layer(DefaultBodyLimit::disable()),
        )
}

/// Build the complete application router with middleware applied.
#[must_use]
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes())
        // Served to browser clients from any origin
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Welcome banner at the API root.
async fn welcome() -> &'static str {
    "Welcome to the Bookstore API"
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}
