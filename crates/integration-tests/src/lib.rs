//! Integration tests for the Bookstore API.
//!
//! # Running Tests
//!
//! ```bash
//! # In-process suites (no external services needed)
//! cargo test -p bookstore-integration-tests
//!
//! # MongoDB-backed suite (requires a running deployment)
//! MONGODB_URI=mongodb://localhost:27017/bookstore_test \
//!     cargo test -p bookstore-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `books_api` - Book inventory endpoint tests
//! - `upload_api` - File upload endpoint tests
//! - `mongo_backend` - Repository tests against a live MongoDB
//!
//! The endpoint suites spawn the full router on an ephemeral port backed by
//! the in-memory repository, so every assertion crosses the real HTTP
//! surface: routing, extractors, middleware, and the wire format.

use std::path::Path;
use std::sync::Arc;

use bookstore_api::config::ApiConfig;
use bookstore_api::db::InMemoryBookRepository;
use bookstore_api::routes;
use bookstore_api::state::AppState;
use tempfile::TempDir;

/// A running test instance of the API.
pub struct TestApp {
    /// Base URL of the spawned server, e.g. `http://127.0.0.1:49123`
    pub base_url: String,
    /// HTTP client for requests against this instance
    pub client: reqwest::Client,
    // Owned so uploaded files are removed when the test ends
    upload_dir: TempDir,
}

impl TestApp {
    /// Full URL for a path on this instance.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Directory where this instance stores uploaded files.
    #[must_use]
    pub fn upload_dir(&self) -> &Path {
        self.upload_dir.path()
    }
}

/// Spawn the API on an ephemeral port with an in-memory book store.
///
/// # Panics
///
/// Panics when the upload directory or listener cannot be created.
pub async fn spawn_app() -> TestApp {
    let upload_dir = TempDir::new().expect("Failed to create upload directory");
    let config = ApiConfig {
        upload_dir: upload_dir.path().to_path_buf(),
        ..ApiConfig::default()
    };

    let state = AppState::new(config, Arc::new(InMemoryBookRepository::new()));
    let app = routes::app(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind ephemeral port");
    let addr = listener.local_addr().expect("Failed to read local address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server error");
    });

    TestApp {
        base_url: format!("http://{addr}"),
        client: reqwest::Client::new(),
        upload_dir,
    }
}
