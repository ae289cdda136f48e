//! SQLite ProjectRepository implementation.

use sqlx::SqlitePool;

use super::helpers::{PROJECT_COLUMNS, project_from_row, query_error};
use crate::db::{DbError, DbResult, Id, Page, Project, ProjectRepository};

/// SQLx-backed project repository.
pub struct SqliteProjectRepository {
    pub(crate) pool: SqlitePool,
}

impl ProjectRepository for SqliteProjectRepository {
    async fn list(&self, page: Page) -> DbResult<Vec<Project>> {
        let sql = format!(
            "SELECT {} FROM project ORDER BY id ASC LIMIT ? OFFSET ?",
            PROJECT_COLUMNS
        );

        let rows = sqlx::query(&sql)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await
            .map_err(query_error)?;

        rows.iter().map(project_from_row).collect()
    }

    async fn get(&self, id: Id) -> DbResult<Project> {
        let sql = format!("SELECT {} FROM project WHERE id = ?", PROJECT_COLUMNS);

        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?
            .ok_or_else(|| DbError::project_not_found(id))?;

        project_from_row(&row)
    }
}
