//! Book inventory records.

use bookstore_core::BookId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A stored book record, in the shape served over the wire.
///
/// The id travels as `_id` and the creation timestamp as `createdAt`; both
/// names come from the document store and are part of the public format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(rename = "_id")]
    pub id: BookId,
    pub bookname: String,
    pub author: String,
    pub quantity: i64,
    pub price: f64,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Validation failure for a book payload.
///
/// Collects every violation so the caller sees all problems at once.
#[derive(Debug, Error)]
#[error("{}", .0.join(", "))]
pub struct ValidationError(pub Vec<String>);

/// A validated request to create a book.
///
/// Construct through [`NewBook::new`]; a value of this type is guaranteed to
/// carry all four required fields, with non-empty text fields.
#[derive(Debug, Clone)]
pub struct NewBook {
    pub bookname: String,
    pub author: String,
    pub quantity: i64,
    pub price: f64,
}

impl NewBook {
    /// Validate raw payload fields into a well-formed record.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] listing each missing or empty field.
    pub fn new(
        bookname: Option<String>,
        author: Option<String>,
        quantity: Option<i64>,
        price: Option<f64>,
    ) -> Result<Self, ValidationError> {
        let mut violations = Vec::new();

        let bookname = require_text("bookname", bookname, &mut violations);
        let author = require_text("author", author, &mut violations);
        if quantity.is_none() {
            violations.push("quantity is required".to_string());
        }
        if price.is_none() {
            violations.push("price is required".to_string());
        }

        match (bookname, author, quantity, price) {
            (Some(bookname), Some(author), Some(quantity), Some(price)) => Ok(Self {
                bookname,
                author,
                quantity,
                price,
            }),
            _ => Err(ValidationError(violations)),
        }
    }
}

fn require_text(field: &str, value: Option<String>, violations: &mut Vec<String>) -> Option<String> {
    match value {
        None => {
            violations.push(format!("{field} is required"));
            None
        }
        Some(s) if s.is_empty() => {
            violations.push(format!("{field} must not be empty"));
            None
        }
        Some(s) => Some(s),
    }
}

/// A partial update to a book; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct BookPatch {
    pub bookname: Option<String>,
    pub author: Option<String>,
    pub quantity: Option<i64>,
    pub price: Option<f64>,
}

impl BookPatch {
    /// True when the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bookname.is_none()
            && self.author.is_none()
            && self.quantity.is_none()
            && self.price.is_none()
    }
}
