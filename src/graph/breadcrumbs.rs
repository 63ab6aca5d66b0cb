// src/graph/breadcrumbs.rs
//! Ancestor paths for navigation.

use super::{ContentGraph, Location};
use crate::error::AppError;
use crate::types::NotionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreadcrumbKind {
    Page,
    Database,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    pub kind: BreadcrumbKind,
    pub id: NotionId,
    pub title: String,
}

/// The path from just below the home page down to `id`, inclusive.
///
/// Pages and databases contribute an entry; blocks are walked through.
/// The home page is never listed, and the walk stops there even if the
/// home page itself has a parent in the workspace.
pub fn breadcrumbs(graph: &ContentGraph, id: &NotionId) -> Result<Vec<Breadcrumb>, AppError> {
    let mut location = match graph.location_of(id) {
        Some(location @ (Location::Page(_) | Location::Database(_))) => location,
        _ => {
            log::error!("Breadcrumbs requested for unknown node {}", id);
            return Err(AppError::DanglingReference { id: id.to_string() });
        }
    };

    let mut trail = Vec::new();
    loop {
        match location {
            Location::Page(page) if page.id.is_index() => break,
            Location::Page(page) => trail.push(Breadcrumb {
                kind: BreadcrumbKind::Page,
                id: page.id.clone(),
                title: graph.page_title(page),
            }),
            Location::Database(database) => trail.push(Breadcrumb {
                kind: BreadcrumbKind::Database,
                id: database.id.clone(),
                title: graph.database_title(database),
            }),
            Location::Block(_) => {}
        }

        let Some(parent_id) = location.parent().id() else {
            break;
        };
        location = graph.location_of(parent_id).ok_or_else(|| {
            log::error!("Parent {} of {} is not loaded", parent_id, id);
            AppError::DanglingReference {
                id: parent_id.to_string(),
            }
        })?;
    }

    trail.reverse();
    Ok(trail)
}
