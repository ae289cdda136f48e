//! Read-only HTTP catalog of projects with their tags and links.

pub mod api;
pub mod db;
