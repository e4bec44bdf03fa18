//! Bookstore Core - Shared types library.
//!
//! This crate provides common types used across the bookstore components:
//! - `api` - HTTP inventory API
//! - `integration-tests` - End-to-end test harness
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrapper for type-safe book identifiers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
