//! SQLite LinkRepository implementation.

use sqlx::{Row, SqlitePool};

use super::helpers::query_error;
use crate::db::{DbResult, Id, Link, LinkRepository};

/// SQLx-backed link repository.
pub struct SqliteLinkRepository {
    pub(crate) pool: SqlitePool,
}

impl LinkRepository for SqliteLinkRepository {
    async fn list_for_project(&self, project_id: Id) -> DbResult<Vec<Link>> {
        let rows = sqlx::query(
            "SELECT id, url, display, type FROM link WHERE project_id = ? ORDER BY id ASC",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
        .map_err(query_error)?;

        rows.iter()
            .map(|row| {
                Ok(Link {
                    id: row.try_get("id").map_err(query_error)?,
                    url: row.try_get("url").map_err(query_error)?,
                    display: row.try_get("display").map_err(query_error)?,
                    kind: row.try_get("type").map_err(query_error)?,
                })
            })
            .collect()
    }
}
