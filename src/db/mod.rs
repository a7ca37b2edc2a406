//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: the message store used by the HTTP handlers

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{DbMessage, NewMessage};
pub use schema::SQLITE_INIT;
pub use sqlite::MessageStorage;
