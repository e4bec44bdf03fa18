//! Integration tests for the MongoDB book repository.
//!
//! These tests require a running MongoDB deployment and are ignored by
//! default. Run with:
//!
//! ```bash
//! MONGODB_URI=mongodb://localhost:27017/bookstore_test \
//!     cargo test -p bookstore-integration-tests --test mongo_backend -- --ignored
//! ```
//!
//! Each test cleans up the records it creates, so the suite is safe to run
//! against a shared deployment.

use bookstore_api::db::{BookRepository, MongoBookRepository};
use bookstore_api::models::{BookPatch, NewBook};
use bookstore_core::BookId;
use secrecy::SecretString;

fn test_uri() -> SecretString {
    SecretString::from(
        std::env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017/bookstore_test".to_string()),
    )
}

async fn repository() -> MongoBookRepository {
    let repo = MongoBookRepository::connect(&test_uri(), None)
        .await
        .expect("Failed to create MongoDB client");
    repo.ping().await.expect("MongoDB deployment not reachable");
    repo
}

fn sample_book() -> NewBook {
    NewBook {
        bookname: "Dune".to_string(),
        author: "Frank Herbert".to_string(),
        quantity: 12,
        price: 9.99,
    }
}

#[tokio::test]
#[ignore = "Requires a running MongoDB deployment"]
async fn test_ping_reaches_deployment() {
    let repo = MongoBookRepository::connect(&test_uri(), None)
        .await
        .expect("Failed to create MongoDB client");

    repo.ping().await.expect("Ping failed");
}

#[tokio::test]
#[ignore = "Requires a running MongoDB deployment"]
async fn test_add_and_delete_round_trip() {
    let repo = repository().await;

    let book = repo.add(sample_book()).await.expect("Failed to add book");
    assert_eq!(book.bookname, "Dune");
    assert_eq!(book.id.to_hex().len(), 24);

    assert!(repo.delete(book.id).await.expect("Failed to delete book"));
    assert!(!repo.delete(book.id).await.expect("Failed to re-delete"));
}

#[tokio::test]
#[ignore = "Requires a running MongoDB deployment"]
async fn test_list_contains_added_book() {
    let repo = repository().await;
    let book = repo.add(sample_book()).await.expect("Failed to add book");

    let books = repo.list().await.expect("Failed to list books");
    assert!(books.iter().any(|b| b.id == book.id));

    repo.delete(book.id).await.expect("Failed to clean up");
}

#[tokio::test]
#[ignore = "Requires a running MongoDB deployment"]
async fn test_update_persists_changes() {
    let repo = repository().await;
    let book = repo.add(sample_book()).await.expect("Failed to add book");

    let updated = repo
        .update(
            book.id,
            BookPatch {
                quantity: Some(4),
                ..BookPatch::default()
            },
        )
        .await
        .expect("Failed to update book")
        .expect("Book disappeared during update");

    assert_eq!(updated.quantity, 4);
    assert_eq!(updated.bookname, "Dune");
    assert_eq!(updated.id, book.id);

    repo.delete(book.id).await.expect("Failed to clean up");
}

#[tokio::test]
#[ignore = "Requires a running MongoDB deployment"]
async fn test_update_unknown_id_returns_none() {
    let repo = repository().await;

    let updated = repo
        .update(
            BookId::new(),
            BookPatch {
                quantity: Some(1),
                ..BookPatch::default()
            },
        )
        .await
        .expect("Failed to run update");

    assert!(updated.is_none());
}
