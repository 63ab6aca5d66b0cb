// src/graph/mod.rs
//! The loaded content graph.
//!
//! Pages and databases keyed by normalized id, plus an index over every
//! block reachable from a page. Built once by [`load_graph`] and read-only
//! afterwards.

mod breadcrumbs;
mod loader;

pub use breadcrumbs::{breadcrumbs, Breadcrumb, BreadcrumbKind};
pub use loader::load_graph;

use crate::constants::UNTITLED_PAGE;
use crate::model::{Database, Page, Parent};
use crate::types::NotionId;
use indexmap::IndexMap;
use std::collections::HashMap;

/// What the block index remembers about one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockEntry {
    pub parent: Parent,
    /// The page whose block tree contains this block.
    pub page_id: NotionId,
}

/// Where an id lives in the graph.
#[derive(Debug, Clone, Copy)]
pub enum Location<'g> {
    Page(&'g Page),
    Database(&'g Database),
    Block(&'g BlockEntry),
}

impl<'g> Location<'g> {
    pub fn parent(&self) -> &'g Parent {
        match *self {
            Location::Page(page) => &page.parent,
            Location::Database(database) => &database.parent,
            Location::Block(block) => &block.parent,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContentGraph {
    pub(crate) pages: IndexMap<NotionId, Page>,
    pub(crate) databases: IndexMap<NotionId, Database>,
    pub(crate) blocks: HashMap<NotionId, BlockEntry>,
}

impl ContentGraph {
    pub fn page(&self, id: &NotionId) -> Option<&Page> {
        self.pages.get(id)
    }

    pub fn database(&self, id: &NotionId) -> Option<&Database> {
        self.databases.get(id)
    }

    pub fn block(&self, id: &NotionId) -> Option<&BlockEntry> {
        self.blocks.get(id)
    }

    /// The home page. Present in every successfully loaded graph.
    pub fn root_page(&self) -> Option<&Page> {
        self.pages.get(NotionId::INDEX)
    }

    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        self.pages.values()
    }

    pub fn databases(&self) -> impl Iterator<Item = &Database> {
        self.databases.values()
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Display title of a page, with a placeholder for untitled pages.
    pub fn page_title(&self, page: &Page) -> String {
        page.title().unwrap_or_else(|| {
            log::warn!("Page {} has no title", page.id);
            UNTITLED_PAGE.to_string()
        })
    }

    pub fn database_title(&self, database: &Database) -> String {
        database.title_text()
    }

    /// Resolves an id to a page, database or block, in that order.
    pub fn location_of(&self, id: &NotionId) -> Option<Location<'_>> {
        self.pages
            .get(id)
            .map(Location::Page)
            .or_else(|| self.databases.get(id).map(Location::Database))
            .or_else(|| self.blocks.get(id).map(Location::Block))
    }
}
