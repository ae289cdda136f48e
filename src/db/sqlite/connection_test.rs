//! Tests for SQLite database connection and migrations.

use super::fixtures::migrated_db;
use crate::db::{Database, DbConfig, SqliteDatabase, TagRepository};

#[tokio::test(flavor = "multi_thread")]
async fn migrate_creates_all_tables() {
    let db = migrated_db().await;

    let tables: Vec<String> =
        sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .fetch_all(db.pool())
            .await
            .expect("Query should succeed");

    for table in ["project", "tag", "project_tag", "link", "_sqlx_migrations"] {
        assert!(
            tables.iter().any(|t| t == table),
            "Missing table: {}. Found tables: {:?}",
            table,
            tables
        );
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn migrate_is_idempotent() {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");

    db.migrate().await.expect("First migration should succeed");
    db.migrate().await.expect("Second migration should succeed");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM project")
        .fetch_one(db.pool())
        .await
        .expect("Query should succeed");
    assert_eq!(count, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn open_creates_database_file_from_config() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("catalog.db");
    let config = DbConfig {
        database: path.clone(),
        ..DbConfig::default()
    };

    let db = SqliteDatabase::from_config(&config)
        .await
        .expect("Open should succeed");
    db.migrate().await.expect("Migration should succeed");
    db.close().await;

    assert!(path.exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn queries_fail_after_close() {
    let db = migrated_db().await;
    db.close().await;

    let result = db.tags().list_for_project(1).await;
    assert!(result.is_err());
}
