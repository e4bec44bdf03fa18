//! Bookstore API - Book inventory HTTP service.
//!
//! This binary serves the book CRUD endpoints and multipart file upload on
//! port 5000 by default.
//!
//! # Architecture
//!
//! - Axum web framework
//! - `MongoDB` for book records (collection `books`)
//! - Local filesystem for uploaded files

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use bookstore_api::config::ApiConfig;
use bookstore_api::db::MongoBookRepository;
use bookstore_api::routes;
use bookstore_api::state::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = ApiConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "bookstore_api=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // The MongoDB client connects lazily, so an unreachable database logs an
    // error here but does not prevent the server from starting
    let books =
        MongoBookRepository::connect(&config.mongodb_uri, config.mongodb_database.as_deref())
            .await
            .expect("Failed to create MongoDB client");

    match books.ping().await {
        Ok(()) => tracing::info!("Connected to MongoDB"),
        Err(err) => tracing::error!(error = %err, "MongoDB connection error"),
    }

    // Build application state and router
    let state = AppState::new(config.clone(), Arc::new(books));
    let app = routes::app(state);

    // Start server
    let addr = config.socket_addr();
    tracing::info!("bookstore-api listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
