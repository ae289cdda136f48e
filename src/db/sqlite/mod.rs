//! SQLite implementation of the database traits.
//!
//! This module provides a SQLx-backed implementation of the repository
//! traits defined in the parent module.

mod connection;
mod helpers;
mod link;
mod project;
mod tag;

#[cfg(test)]
pub(crate) mod fixtures;

#[cfg(test)]
mod connection_test;
#[cfg(test)]
mod link_test;

pub use connection::SqliteDatabase;
pub use link::SqliteLinkRepository;
pub use project::SqliteProjectRepository;
pub use tag::SqliteTagRepository;
