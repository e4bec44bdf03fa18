//! MongoDB-backed book repository.

use async_trait::async_trait;
use bookstore_core::BookId;
use bson::oid::ObjectId;
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use bson::{Document, doc};
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::options::ReturnDocument;
use mongodb::{Client, Collection, Database};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{BookRepository, RepositoryError};
use crate::models::{Book, BookPatch, NewBook};

const COLLECTION: &str = "books";
const DEFAULT_DATABASE: &str = "bookstore";

/// A book as stored in the `books` collection.
///
/// `createdAt` is a native BSON datetime so range queries stay possible from
/// the shell; the API model uses chrono, hence the serde helper.
#[derive(Debug, Serialize, Deserialize)]
struct BookDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    bookname: String,
    author: String,
    quantity: i64,
    price: f64,
    #[serde(rename = "createdAt", with = "chrono_datetime_as_bson_datetime")]
    created_at: DateTime<Utc>,
}

/// Insert payload. Carries no `_id`; the driver assigns one.
#[derive(Debug, Serialize)]
struct NewBookDocument {
    bookname: String,
    author: String,
    quantity: i64,
    price: f64,
    #[serde(rename = "createdAt", with = "chrono_datetime_as_bson_datetime")]
    created_at: DateTime<Utc>,
}

impl From<BookDocument> for Book {
    fn from(document: BookDocument) -> Self {
        Self {
            id: BookId::from(document.id),
            bookname: document.bookname,
            author: document.author,
            quantity: document.quantity,
            price: document.price,
            created_at: document.created_at,
        }
    }
}

fn set_document(patch: &BookPatch) -> Document {
    let mut set = Document::new();
    if let Some(bookname) = &patch.bookname {
        set.insert("bookname", bookname.as_str());
    }
    if let Some(author) = &patch.author {
        set.insert("author", author.as_str());
    }
    if let Some(quantity) = patch.quantity {
        set.insert("quantity", quantity);
    }
    if let Some(price) = patch.price {
        set.insert("price", price);
    }
    set
}

/// Book repository backed by a MongoDB collection.
#[derive(Clone)]
pub struct MongoBookRepository {
    database: Database,
    collection: Collection<BookDocument>,
}

impl MongoBookRepository {
    /// Connect to MongoDB and bind the `books` collection.
    ///
    /// The driver connects lazily: this call validates the URI but performs
    /// no I/O, so an unreachable deployment does not fail startup. Use
    /// [`Self::ping`] to probe reachability.
    ///
    /// The database is picked in order: the `database` override, the database
    /// named in the URI path, then `bookstore`.
    ///
    /// # Errors
    ///
    /// Returns an error when the URI cannot be parsed.
    pub async fn connect(
        uri: &SecretString,
        database: Option<&str>,
    ) -> Result<Self, RepositoryError> {
        let client = Client::with_uri_str(uri.expose_secret()).await?;
        let database = match database {
            Some(name) => client.database(name),
            None => client
                .default_database()
                .unwrap_or_else(|| client.database(DEFAULT_DATABASE)),
        };
        let collection = database.collection::<BookDocument>(COLLECTION);

        Ok(Self {
            database,
            collection,
        })
    }

    /// Round-trip a `ping` command to check that the deployment is reachable.
    ///
    /// # Errors
    ///
    /// Returns an error when the server cannot be reached.
    pub async fn ping(&self) -> Result<(), RepositoryError> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

#[async_trait]
impl BookRepository for MongoBookRepository {
    #[instrument(skip(self, book), fields(bookname = %book.bookname))]
    async fn add(&self, book: NewBook) -> Result<Book, RepositoryError> {
        let document = NewBookDocument {
            bookname: book.bookname,
            author: book.author,
            quantity: book.quantity,
            price: book.price,
            // Minted at BSON millisecond precision so the record returned
            // here is identical to every later read of it
            created_at: bson::DateTime::now().to_chrono(),
        };

        let inserted = self
            .collection
            .clone_with_type::<NewBookDocument>()
            .insert_one(&document)
            .await?;
        let id = inserted.inserted_id.as_object_id().ok_or_else(|| {
            RepositoryError::DataCorruption("insert returned a non-ObjectId id".to_string())
        })?;

        Ok(Book {
            id: BookId::from(id),
            bookname: document.bookname,
            author: document.author,
            quantity: document.quantity,
            price: document.price,
            created_at: document.created_at,
        })
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Book>, RepositoryError> {
        let mut cursor = self.collection.find(doc! {}).await?;
        let mut books = Vec::new();
        while let Some(document) = cursor.try_next().await? {
            books.push(Book::from(document));
        }
        Ok(books)
    }

    #[instrument(skip(self, patch))]
    async fn update(&self, id: BookId, patch: BookPatch) -> Result<Option<Book>, RepositoryError> {
        let filter = doc! { "_id": id.as_object_id() };

        // $set rejects an empty document, so an empty patch is a plain read
        if patch.is_empty() {
            let found = self.collection.find_one(filter).await?;
            return Ok(found.map(Book::from));
        }

        let updated = self
            .collection
            .find_one_and_update(filter, doc! { "$set": set_document(&patch) })
            .return_document(ReturnDocument::After)
            .await?;
        Ok(updated.map(Book::from))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: BookId) -> Result<bool, RepositoryError> {
        let deleted = self
            .collection
            .find_one_and_delete(doc! { "_id": id.as_object_id() })
            .await?;
        Ok(deleted.is_some())
    }
}
