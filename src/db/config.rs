//! Database connection configuration read from the environment.

use std::path::PathBuf;

/// Default database file when `DB_DATABASE` is unset.
pub const DEFAULT_DB_PATH: &str = "projects.db";

/// Connection parameters for the store.
///
/// `user`, `password` and `address` are carried for networked backends; the
/// SQLite backend only uses `database`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub user: Option<String>,
    pub password: Option<String>,
    pub address: Option<String>,
    pub database: PathBuf,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            user: None,
            password: None,
            address: None,
            database: PathBuf::from(DEFAULT_DB_PATH),
        }
    }
}

impl DbConfig {
    /// Read `DB_USER`, `DB_PASSWORD`, `DB_ADDRESS` and `DB_DATABASE` from the
    /// process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup. Empty values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        Self {
            user: get("DB_USER"),
            password: get("DB_PASSWORD"),
            address: get("DB_ADDRESS"),
            database: get("DB_DATABASE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH)),
        }
    }
}
