//! Database abstraction layer.
//!
//! This module provides trait-based abstractions for data access,
//! allowing different storage backends (SQLite, in-memory, etc.)
//! to be swapped without changing the request pipeline.
//!
//! # Architecture
//!
//! - `error`: Storage-agnostic error types
//! - `models`: Domain entities (Project, Tag, Link)
//! - `repository`: Trait definitions for data access
//! - `sqlite`: SQLx-backed implementation

mod config;
mod error;
mod models;
mod repository;
pub mod sqlite;

#[cfg(test)]
pub(crate) mod memory;


pub use config::{DEFAULT_DB_PATH, DbConfig};
pub use error::{DbError, DbResult};
pub use models::*;
pub use repository::*;
pub use sqlite::SqliteDatabase;
