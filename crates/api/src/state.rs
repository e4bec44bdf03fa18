//! Shared application state.

use std::path::Path;
use std::sync::Arc;

use crate::config::ApiConfig;
use crate::db::BookRepository;

/// Shared application state available to all request handlers.
///
/// Cheap to clone; the inner data is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    books: Arc<dyn BookRepository>,
}

impl AppState {
    /// Create application state from a configuration and a book store.
    #[must_use]
    pub fn new(config: ApiConfig, books: Arc<dyn BookRepository>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, books }),
        }
    }

    /// Access the API configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Access the book repository.
    #[must_use]
    pub fn books(&self) -> &dyn BookRepository {
        self.inner.books.as_ref()
    }

    /// Directory where uploaded files are written.
    #[must_use]
    pub fn upload_dir(&self) -> &Path {
        &self.inner.config.upload_dir
    }
}
