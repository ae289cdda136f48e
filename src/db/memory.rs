//! In-memory `Database` double for handler and server tests.
//!
//! Supports fault injection per project and an artificial delay on project
//! listing so tests can hold a request in flight.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use chrono::{TimeZone, Utc};

use crate::db::{
    Database, DbError, DbResult, Id, Link, LinkRepository, Page, Project, ProjectRepository, Tag,
    TagRepository,
};

#[derive(Default)]
struct Store {
    projects: Vec<Project>,
    tags: HashMap<Id, Vec<Tag>>,
    links: HashMap<Id, Vec<Link>>,
    failing_tags: HashSet<Id>,
    failing_links: HashSet<Id>,
    fail_listing: bool,
    list_delay: Option<Duration>,
    tag_delay: Option<Duration>,
    tag_calls: AtomicUsize,
    tags_in_flight: AtomicUsize,
    peak_tags_in_flight: AtomicUsize,
}

#[derive(Clone, Default)]
pub struct MemoryDatabase {
    store: Arc<Store>,
}

/// Project with fixed dates, ongoing.
pub fn project(id: Id, name: &str) -> Project {
    Project {
        id,
        name: name.to_string(),
        description: format!("{} description", name),
        start_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        end_date: None,
        status: "active".to_string(),
        priority: "medium".to_string(),
    }
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    fn store_mut(&mut self) -> &mut Store {
        Arc::get_mut(&mut self.store).expect("configure MemoryDatabase before sharing it")
    }

    pub fn with_project(mut self, project: Project) -> Self {
        let store = self.store_mut();
        store.projects.push(project);
        store.projects.sort_by_key(|p| p.id);
        self
    }

    pub fn with_tag(mut self, project_id: Id, tag_id: Id, name: &str) -> Self {
        self.store_mut()
            .tags
            .entry(project_id)
            .or_default()
            .push(Tag {
                id: tag_id,
                name: name.to_string(),
            });
        self
    }

    pub fn with_link(mut self, project_id: Id, link_id: Id, url: &str) -> Self {
        self.store_mut()
            .links
            .entry(project_id)
            .or_default()
            .push(Link {
                id: link_id,
                url: url.to_string(),
                display: "link".to_string(),
                kind: "docs".to_string(),
            });
        self
    }

    pub fn failing_tags_for(mut self, project_id: Id) -> Self {
        self.store_mut().failing_tags.insert(project_id);
        self
    }

    pub fn failing_links_for(mut self, project_id: Id) -> Self {
        self.store_mut().failing_links.insert(project_id);
        self
    }

    pub fn failing_listing(mut self) -> Self {
        self.store_mut().fail_listing = true;
        self
    }

    pub fn with_list_delay(mut self, delay: Duration) -> Self {
        self.store_mut().list_delay = Some(delay);
        self
    }

    pub fn with_tag_delay(mut self, delay: Duration) -> Self {
        self.store_mut().tag_delay = Some(delay);
        self
    }

    /// Highest number of tag lookups observed running at once.
    pub fn peak_tags_in_flight(&self) -> usize {
        self.store.peak_tags_in_flight.load(Ordering::SeqCst)
    }

    /// Number of tag lookups served so far.
    pub fn tag_calls(&self) -> usize {
        self.store.tag_calls.load(Ordering::SeqCst)
    }
}

fn injected(what: &str, id: Id) -> DbError {
    DbError::Database {
        message: format!("injected {} failure for project {}", what, id),
    }
}

pub struct MemoryProjects(Arc<Store>);
pub struct MemoryTags(Arc<Store>);
pub struct MemoryLinks(Arc<Store>);

impl ProjectRepository for MemoryProjects {
    async fn list(&self, page: Page) -> DbResult<Vec<Project>> {
        if let Some(delay) = self.0.list_delay {
            tokio::time::sleep(delay).await;
        }
        if self.0.fail_listing {
            return Err(DbError::Connection {
                message: "injected listing failure".to_string(),
            });
        }

        Ok(self
            .0
            .projects
            .iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .cloned()
            .collect())
    }

    async fn get(&self, id: Id) -> DbResult<Project> {
        self.0
            .projects
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| DbError::project_not_found(id))
    }
}

impl TagRepository for MemoryTags {
    async fn list_for_project(&self, project_id: Id) -> DbResult<Vec<Tag>> {
        self.0.tag_calls.fetch_add(1, Ordering::SeqCst);
        let running = self.0.tags_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.0.peak_tags_in_flight.fetch_max(running, Ordering::SeqCst);
        if let Some(delay) = self.0.tag_delay {
            tokio::time::sleep(delay).await;
        }
        self.0.tags_in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.0.failing_tags.contains(&project_id) {
            return Err(injected("tag", project_id));
        }
        Ok(self.0.tags.get(&project_id).cloned().unwrap_or_default())
    }
}

impl LinkRepository for MemoryLinks {
    async fn list_for_project(&self, project_id: Id) -> DbResult<Vec<Link>> {
        if self.0.failing_links.contains(&project_id) {
            return Err(injected("link", project_id));
        }
        Ok(self.0.links.get(&project_id).cloned().unwrap_or_default())
    }
}

impl Database for MemoryDatabase {
    type Projects = MemoryProjects;
    type Tags = MemoryTags;
    type Links = MemoryLinks;

    async fn migrate(&self) -> DbResult<()> {
        Ok(())
    }

    fn projects(&self) -> Self::Projects {
        MemoryProjects(Arc::clone(&self.store))
    }

    fn tags(&self) -> Self::Tags {
        MemoryTags(Arc::clone(&self.store))
    }

    fn links(&self) -> Self::Links {
        MemoryLinks(Arc::clone(&self.store))
    }
}
