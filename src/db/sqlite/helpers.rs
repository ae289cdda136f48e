//! Shared helper functions for SQLite repositories.

use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::db::{DbError, DbResult, Project};

/// Columns selected for every project query, in `project_from_row` order.
pub const PROJECT_COLUMNS: &str =
    "id, name, description, start_date, end_date, status, priority";

/// Map a query failure to the storage-agnostic error.
pub fn query_error(e: sqlx::Error) -> DbError {
    DbError::Database {
        message: e.to_string(),
    }
}

/// Map a column that could not be decoded into the target type.
pub fn decode_error(column: &str, e: sqlx::Error) -> DbError {
    DbError::InvalidData {
        message: format!("column '{}' could not be decoded: {}", column, e),
        help: "timestamps must be stored as RFC 3339 or 'YYYY-MM-DD HH:MM:SS' text".to_string(),
    }
}

/// Build a Project from a row selected with `PROJECT_COLUMNS`.
pub fn project_from_row(row: &SqliteRow) -> DbResult<Project> {
    let start_date: DateTime<Utc> = row
        .try_get("start_date")
        .map_err(|e| decode_error("start_date", e))?;
    let end_date: Option<DateTime<Utc>> = row
        .try_get("end_date")
        .map_err(|e| decode_error("end_date", e))?;

    Ok(Project {
        id: row.try_get("id").map_err(query_error)?,
        name: row.try_get("name").map_err(query_error)?,
        description: row.try_get("description").map_err(query_error)?,
        start_date,
        end_date,
        status: row.try_get("status").map_err(query_error)?,
        priority: row.try_get("priority").map_err(query_error)?,
    })
}
