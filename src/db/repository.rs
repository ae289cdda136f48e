//! Repository traits for data access abstraction.
//!
//! These traits define the contract for data access, allowing different
//! storage backends to be swapped without changing business logic. All
//! operations are read-only.

use std::future::Future;

use crate::db::{
    DbResult,
    models::{Id, Link, Page, Project, Tag},
};

/// Repository for Project operations.
pub trait ProjectRepository: Send + Sync {
    /// List one page of projects ordered by id ascending.
    fn list(&self, page: Page) -> impl Future<Output = DbResult<Vec<Project>>> + Send;

    /// Get a project by ID.
    fn get(&self, id: Id) -> impl Future<Output = DbResult<Project>> + Send;
}

/// Repository for Tag operations.
pub trait TagRepository: Send + Sync {
    /// Get all tags associated with a project. Empty when there are none.
    fn list_for_project(&self, project_id: Id) -> impl Future<Output = DbResult<Vec<Tag>>> + Send;
}

/// Repository for Link operations.
pub trait LinkRepository: Send + Sync {
    /// Get all links owned by a project. Empty when there are none.
    fn list_for_project(&self, project_id: Id)
    -> impl Future<Output = DbResult<Vec<Link>>> + Send;
}

/// Combined database interface.
///
/// Repositories are cheap handles created per call; implementations share a
/// pool or equivalent internally.
pub trait Database: Send + Sync {
    type Projects: ProjectRepository;
    type Tags: TagRepository;
    type Links: LinkRepository;

    /// Run pending migrations.
    fn migrate(&self) -> impl Future<Output = DbResult<()>> + Send;

    /// Get the project repository.
    fn projects(&self) -> Self::Projects;

    /// Get the tag repository.
    fn tags(&self) -> Self::Tags;

    /// Get the link repository.
    fn links(&self) -> Self::Links;
}
