//! Data access layer.
//!
//! Handlers talk to [`BookRepository`] and never to a driver directly.
//! [`MongoBookRepository`] is the production backend; [`InMemoryBookRepository`]
//! backs the test suites.

use async_trait::async_trait;
use bookstore_core::BookId;
use thiserror::Error;

use crate::models::{Book, BookPatch, NewBook};

pub mod memory;
pub mod mongo;

pub use memory::InMemoryBookRepository;
pub use mongo::MongoBookRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// Stored data does not match the expected shape
    #[error("Data corruption: {0}")]
    DataCorruption(String),
}

/// Store of book records.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Insert a new book and return the stored record, id and timestamp
    /// assigned.
    async fn add(&self, book: NewBook) -> Result<Book, RepositoryError>;

    /// List every book in insertion order.
    async fn list(&self) -> Result<Vec<Book>, RepositoryError>;

    /// Apply a partial update and return the record as it reads afterwards.
    ///
    /// Returns `Ok(None)` when no book has the given id.
    async fn update(&self, id: BookId, patch: BookPatch) -> Result<Option<Book>, RepositoryError>;

    /// Delete a book. Returns `true` when a record was removed.
    async fn delete(&self, id: BookId) -> Result<bool, RepositoryError>;
}
