//! Per-request aggregation of tags and links onto projects.
//!
//! Lookups run concurrently across the page, at most
//! [`MAX_CONCURRENT_PROJECTS`] projects at a time, with tags and links fetched
//! concurrently per project. The first failure resolves the whole aggregation to that error
//! and drops every fetch still in flight, so callers never see a partially
//! enriched page.
// TODO: replace the per-project lookups with one joined query per page once
// the store grows a batched tag/link operation.

use futures_util::stream::{self, StreamExt, TryStreamExt};
use futures_util::try_join;

use crate::api::handlers::ProjectResponse;
use crate::db::{Database, DbResult, LinkRepository, Project, TagRepository};

/// Projects aggregated at once; matches the SQLite pool size.
pub const MAX_CONCURRENT_PROJECTS: usize = 8;

/// Attach tags and links to a single project.
pub async fn aggregate_project<D: Database>(db: &D, project: Project) -> DbResult<ProjectResponse> {
    let tags = db.tags();
    let links = db.links();

    let (tags, links) = try_join!(
        tags.list_for_project(project.id),
        links.list_for_project(project.id)
    )?;

    Ok(ProjectResponse::from_parts(project, tags, links))
}

/// Aggregate a page, preserving page order.
pub async fn aggregate_page<D: Database>(
    db: &D,
    projects: Vec<Project>,
) -> DbResult<Vec<ProjectResponse>> {
    stream::iter(projects)
        .map(|project| aggregate_project(db, project))
        .buffered(MAX_CONCURRENT_PROJECTS)
        .try_collect()
        .await
}
