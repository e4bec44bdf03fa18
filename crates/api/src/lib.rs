//! Bookstore inventory API library.
//!
//! This crate provides the API functionality as a library, allowing it to be
//! tested and reused. The binary in `main.rs` wires the MongoDB-backed
//! repository into the router; the integration tests assemble the same
//! router around the in-memory repository.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
