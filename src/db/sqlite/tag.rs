//! SQLite TagRepository implementation.

use sqlx::{Row, SqlitePool};

use super::helpers::query_error;
use crate::db::{DbResult, Id, Tag, TagRepository};

/// SQLx-backed tag repository.
pub struct SqliteTagRepository {
    pub(crate) pool: SqlitePool,
}

impl TagRepository for SqliteTagRepository {
    async fn list_for_project(&self, project_id: Id) -> DbResult<Vec<Tag>> {
        let rows = sqlx::query(
            "SELECT t.id, t.name FROM tag t \
             JOIN project_tag pt ON pt.tag_id = t.id \
             WHERE pt.project_id = ? ORDER BY t.id ASC",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
        .map_err(query_error)?;

        rows.iter()
            .map(|row| {
                Ok(Tag {
                    id: row.try_get("id").map_err(query_error)?,
                    name: row.try_get("name").map_err(query_error)?,
                })
            })
            .collect()
    }
}
