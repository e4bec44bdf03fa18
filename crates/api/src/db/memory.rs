//! In-memory book repository.

use async_trait::async_trait;
use bookstore_core::BookId;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{BookRepository, RepositoryError};
use crate::models::{Book, BookPatch, NewBook};

/// Book repository that keeps records in process memory.
///
/// Matches the MongoDB backend's observable behavior: ids and creation
/// timestamps are assigned on insert and listing preserves insertion order.
/// Used by the integration test suites; nothing persists across restarts.
#[derive(Debug, Default)]
pub struct InMemoryBookRepository {
    books: RwLock<Vec<Book>>,
}

impl InMemoryBookRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn add(&self, book: NewBook) -> Result<Book, RepositoryError> {
        let book = Book {
            id: BookId::new(),
            bookname: book.bookname,
            author: book.author,
            quantity: book.quantity,
            price: book.price,
            created_at: Utc::now(),
        };
        self.books.write().await.push(book.clone());
        Ok(book)
    }

    async fn list(&self) -> Result<Vec<Book>, RepositoryError> {
        Ok(self.books.read().await.clone())
    }

    async fn update(&self, id: BookId, patch: BookPatch) -> Result<Option<Book>, RepositoryError> {
        let mut books = self.books.write().await;
        let Some(book) = books.iter_mut().find(|book| book.id == id) else {
            return Ok(None);
        };

        if let Some(bookname) = patch.bookname {
            book.bookname = bookname;
        }
        if let Some(author) = patch.author {
            book.author = author;
        }
        if let Some(quantity) = patch.quantity {
            book.quantity = quantity;
        }
        if let Some(price) = patch.price {
            book.price = price;
        }

        Ok(Some(book.clone()))
    }

    async fn delete(&self, id: BookId) -> Result<bool, RepositoryError> {
        let mut books = self.books.write().await;
        let before = books.len();
        books.retain(|book| book.id != id);
        Ok(books.len() < before)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dune() -> NewBook {
        NewBook {
            bookname: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            quantity: 12,
            price: 9.99,
        }
    }

    #[tokio::test]
    async fn test_add_assigns_id_and_timestamp() {
        let repo = InMemoryBookRepository::new();
        let before = Utc::now();

        let book = repo.add(dune()).await.unwrap();

        assert_eq!(book.bookname, "Dune");
        assert!(book.created_at >= before);
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let repo = InMemoryBookRepository::new();
        repo.add(dune()).await.unwrap();
        repo.add(NewBook {
            bookname: "Dune Messiah".to_string(),
            ..dune()
        })
        .await
        .unwrap();

        let books = repo.list().await.unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].bookname, "Dune");
        assert_eq!(books[1].bookname, "Dune Messiah");
    }

    #[tokio::test]
    async fn test_update_patches_only_set_fields() {
        let repo = InMemoryBookRepository::new();
        let book = repo.add(dune()).await.unwrap();

        let updated = repo
            .update(
                book.id,
                BookPatch {
                    quantity: Some(4),
                    ..BookPatch::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.quantity, 4);
        assert_eq!(updated.bookname, "Dune");
        assert_eq!(updated.author, "Frank Herbert");
        assert_eq!(updated.created_at, book.created_at);
    }

    #[tokio::test]
    async fn test_update_unknown_id_returns_none() {
        let repo = InMemoryBookRepository::new();
        repo.add(dune()).await.unwrap();

        let updated = repo
            .update(BookId::new(), BookPatch::default())
            .await
            .unwrap();
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let repo = InMemoryBookRepository::new();
        let book = repo.add(dune()).await.unwrap();

        assert!(repo.delete(book.id).await.unwrap());
        assert!(!repo.delete(book.id).await.unwrap());
        assert!(repo.list().await.unwrap().is_empty());
    }
}
