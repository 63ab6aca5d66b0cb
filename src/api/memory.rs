// src/api/memory.rs
//! An in-memory [`NotionRepository`], for tests and offline fixtures.
//!
//! Content is registered up front; every retrieval is counted so callers
//! can assert how often the transport was hit.

use super::NotionRepository;
use crate::error::{AppError, NotionErrorCode};
use crate::model::{Block, Database, Page};
use crate::types::NotionId;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct InMemoryRepository {
    pages: HashMap<NotionId, Page>,
    databases: HashMap<NotionId, Database>,
    children: HashMap<NotionId, Vec<Block>>,
    rows: HashMap<NotionId, Vec<NotionId>>,
    assets: HashMap<String, Vec<u8>>,
    retrievals: Mutex<HashMap<NotionId, usize>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a page. Its `children` become the page's top-level blocks.
    pub fn with_page(mut self, mut page: Page) -> Self {
        let children = std::mem::take(&mut page.children);
        self.children.insert(page.id.clone(), children);
        self.pages.insert(page.id.clone(), page);
        self
    }

    /// Registers a database and the ids of its row pages.
    pub fn with_database(mut self, database: Database, rows: Vec<NotionId>) -> Self {
        self.rows.insert(database.id.clone(), rows);
        self.databases.insert(database.id.clone(), database);
        self
    }

    /// Registers the children of a container block.
    pub fn with_block_children(mut self, block: impl Into<NotionId>, children: Vec<Block>) -> Self {
        self.children.insert(block.into(), children);
        self
    }

    pub fn with_asset(mut self, url: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.assets.insert(url.into(), bytes);
        self
    }

    /// How many times a page or database was retrieved.
    pub fn retrievals(&self, id: &NotionId) -> usize {
        self.lock_retrievals().get(id).copied().unwrap_or(0)
    }

    fn record(&self, id: &NotionId) {
        *self.lock_retrievals().entry(id.clone()).or_default() += 1;
    }

    fn lock_retrievals(&self) -> std::sync::MutexGuard<'_, HashMap<NotionId, usize>> {
        self.retrievals
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn not_found(what: &str, id: impl std::fmt::Display) -> AppError {
    AppError::NotionService {
        code: NotionErrorCode::ObjectNotFound,
        message: format!("Could not find {} with ID: {}", what, id),
        status: reqwest::StatusCode::NOT_FOUND,
    }
}

#[async_trait::async_trait]
impl NotionRepository for InMemoryRepository {
    async fn retrieve_page(&self, id: &NotionId) -> Result<Page, AppError> {
        self.record(id);
        self.pages
            .get(id)
            .cloned()
            .ok_or_else(|| not_found("page", id))
    }

    async fn retrieve_database(&self, id: &NotionId) -> Result<Database, AppError> {
        self.record(id);
        self.databases
            .get(id)
            .cloned()
            .ok_or_else(|| not_found("database", id))
    }

    async fn retrieve_children(&self, parent: &NotionId) -> Result<Vec<Block>, AppError> {
        Ok(self.children.get(parent).cloned().unwrap_or_default())
    }

    async fn query_rows(&self, database: &NotionId) -> Result<Vec<Page>, AppError> {
        let ids = self
            .rows
            .get(database)
            .ok_or_else(|| not_found("database", database))?;
        ids.iter()
            .map(|id| {
                let mut row = self.pages.get(id).cloned().ok_or_else(|| not_found("page", id))?;
                row.children.clear();
                Ok(row)
            })
            .collect()
    }

    async fn download_asset(&self, url: &str) -> Result<Vec<u8>, AppError> {
        self.assets
            .get(url)
            .cloned()
            .ok_or_else(|| not_found("asset", url))
    }
}
