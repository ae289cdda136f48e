//! Seeding helpers shared by SQLite-backed tests.

use crate::db::{Database, Id, SqliteDatabase};

/// In-memory database with the schema applied.
pub async fn migrated_db() -> SqliteDatabase {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("Migration should succeed");
    db
}

/// Insert a project and return its store-assigned id.
pub async fn insert_project(
    db: &SqliteDatabase,
    name: &str,
    start_date: &str,
    end_date: Option<&str>,
) -> Id {
    sqlx::query(
        "INSERT INTO project (name, description, start_date, end_date, status, priority) \
         VALUES (?, ?, ?, ?, 'active', 'medium')",
    )
    .bind(name)
    .bind(format!("{} description", name))
    .bind(start_date)
    .bind(end_date)
    .execute(db.pool())
    .await
    .expect("Insert project should succeed")
    .last_insert_rowid()
}

/// Attach a tag (created on first use) to a project.
pub async fn tag_project(db: &SqliteDatabase, project_id: Id, tag: &str) -> Id {
    sqlx::query("INSERT OR IGNORE INTO tag (name) VALUES (?)")
        .bind(tag)
        .execute(db.pool())
        .await
        .expect("Insert tag should succeed");

    let tag_id: Id = sqlx::query_scalar("SELECT id FROM tag WHERE name = ?")
        .bind(tag)
        .fetch_one(db.pool())
        .await
        .expect("Tag lookup should succeed");

    sqlx::query("INSERT INTO project_tag (project_id, tag_id) VALUES (?, ?)")
        .bind(project_id)
        .bind(tag_id)
        .execute(db.pool())
        .await
        .expect("Insert project_tag should succeed");

    tag_id
}

/// Insert a link owned by a project.
pub async fn insert_link(db: &SqliteDatabase, project_id: Id, url: &str, kind: &str) -> Id {
    sqlx::query("INSERT INTO link (project_id, url, display, type) VALUES (?, ?, ?, ?)")
        .bind(project_id)
        .bind(url)
        .bind(format!("{} link", kind))
        .bind(kind)
        .execute(db.pool())
        .await
        .expect("Insert link should succeed")
        .last_insert_rowid()
}
