//! Tests for SqliteLinkRepository.

use super::fixtures::{insert_link, insert_project, migrated_db};
use crate::db::{Database, LinkRepository};

#[tokio::test(flavor = "multi_thread")]
async fn list_for_project_is_keyed_by_project() {
    let db = migrated_db().await;
    let first = insert_project(&db, "first", "2024-01-01T00:00:00Z", None).await;
    let second = insert_project(&db, "second", "2024-01-01T00:00:00Z", None).await;

    let link_id = insert_link(&db, first, "https://example.com/docs", "docs").await;
    insert_link(&db, second, "https://example.com/repo", "repo").await;

    let links = db
        .links()
        .list_for_project(first)
        .await
        .expect("List should succeed");

    assert_eq!(links.len(), 1);
    assert_eq!(links[0].id, link_id);
    assert_eq!(links[0].url, "https://example.com/docs");
    assert_eq!(links[0].display, "docs link");
    assert_eq!(links[0].kind, "docs");
}

#[tokio::test(flavor = "multi_thread")]
async fn project_without_links_has_empty_link_set() {
    let db = migrated_db().await;
    let id = insert_project(&db, "bare", "2024-01-01T00:00:00Z", None).await;

    let links = db
        .links()
        .list_for_project(id)
        .await
        .expect("List should succeed");
    assert!(links.is_empty());
}
