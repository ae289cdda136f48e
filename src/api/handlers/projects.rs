//! Project listing handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

use crate::api::aggregate::{aggregate_page, aggregate_project};
use crate::api::encode::encode;
use crate::api::query::{RawQuery, page_from_query};
use crate::api::{ApiError, AppState};
use crate::db::{Database, DbError, Id, Link, Project, ProjectRepository, Tag};

// =============================================================================
// DTOs (Data Transfer Objects)
// =============================================================================

/// Tag response DTO
#[derive(Debug, Serialize, ToSchema)]
pub struct TagResponse {
    #[schema(example = 4)]
    pub id: Id,
    #[schema(example = "backend")]
    pub name: String,
}

impl From<Tag> for TagResponse {
    fn from(t: Tag) -> Self {
        Self {
            id: t.id,
            name: t.name,
        }
    }
}

/// Link response DTO
#[derive(Debug, Serialize, ToSchema)]
pub struct LinkResponse {
    #[schema(example = 12)]
    pub id: Id,
    #[schema(example = "https://github.com/example/catalog")]
    pub url: String,
    /// Human-readable label
    #[schema(example = "Source code")]
    pub display: String,
    #[serde(rename = "type")]
    #[schema(example = "repository")]
    pub kind: String,
}

impl From<Link> for LinkResponse {
    fn from(l: Link) -> Self {
        Self {
            id: l.id,
            url: l.url,
            display: l.display,
            kind: l.kind,
        }
    }
}

/// Project response DTO
///
/// `endDate`, `tags` and `links` are omitted when absent or empty.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    #[schema(example = 1)]
    pub id: Id,
    #[schema(example = "Catalog API")]
    pub name: String,
    #[schema(example = "Read-only project listing")]
    pub description: String,
    pub start_date: DateTime<Utc>,
    /// Absent while the project is ongoing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[schema(example = "active")]
    pub status: String,
    #[schema(example = "high")]
    pub priority: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<TagResponse>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<LinkResponse>,
}

impl ProjectResponse {
    pub fn from_parts(p: Project, tags: Vec<Tag>, links: Vec<Link>) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            start_date: p.start_date,
            end_date: p.end_date,
            status: p.status,
            priority: p.priority,
            tags: tags.into_iter().map(TagResponse::from).collect(),
            links: links.into_iter().map(LinkResponse::from).collect(),
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// List projects
///
/// Returns one page of projects ordered by id, each with its tags and links
#[utoipa::path(
    get,
    path = "/projects",
    tag = "projects",
    params(
        ("limit" = Option<i64>, Query, description = "Page size, 1 to 100 (default 20)", example = 20),
        ("offset" = Option<i64>, Query, description = "Projects to skip, 0 or more (default 0)", example = 0)
    ),
    responses(
        (status = 200, description = "Page of projects", body = Vec<ProjectResponse>),
        (status = 400, description = "Invalid limit or offset", body = String, content_type = "text/plain"),
        (status = 500, description = "Internal server error")
    )
)]
#[instrument(skip(state))]
pub async fn list_projects<D: Database>(
    State(state): State<AppState<D>>,
    Query(query): Query<RawQuery>,
) -> Result<Response, ApiError> {
    let page = page_from_query(&query)?;

    let projects = state.db().projects().list(page).await?;
    let items = aggregate_page(state.db(), projects).await?;

    encode(StatusCode::OK, &items)
}

/// Get a project by ID
///
/// Returns a single project with its tags and links
#[utoipa::path(
    get,
    path = "/projects/{id}",
    tag = "projects",
    params(
        ("id" = i64, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project found", body = ProjectResponse),
        (status = 404, description = "Project not found", body = String, content_type = "text/plain"),
        (status = 500, description = "Internal server error")
    )
)]
#[instrument(skip(state))]
pub async fn get_project<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<Id>,
) -> Result<Response, ApiError> {
    let project = state.db().projects().get(id).await.map_err(|e| match e {
        DbError::NotFound { .. } => ApiError::NotFound { id },
        other => ApiError::Storage(other),
    })?;

    let item = aggregate_project(state.db(), project).await?;

    encode(StatusCode::OK, &item)
}
