// src/api/mod.rs
//! Notion API interaction: retrieving content from a workspace.
//!
//! Traversal depends on [`NotionRepository`] only; HTTP, pagination and
//! retries stay behind it.

pub mod client;
pub mod memory;
mod pagination;
pub mod parser;

use crate::error::AppError;
use crate::model::{Block, Database, Page};
use crate::types::NotionId;

/// The ability to retrieve content from a Notion workspace.
#[async_trait::async_trait]
pub trait NotionRepository: Send + Sync {
    /// A page's metadata and properties. `children` is left empty.
    async fn retrieve_page(&self, id: &NotionId) -> Result<Page, AppError>;

    /// A database's title and schema.
    async fn retrieve_database(&self, id: &NotionId) -> Result<Database, AppError>;

    /// The direct children of a page or block, every cursor page concatenated.
    async fn retrieve_children(&self, parent: &NotionId) -> Result<Vec<Block>, AppError>;

    /// Every row page of a database.
    async fn query_rows(&self, database: &NotionId) -> Result<Vec<Page>, AppError>;

    /// Raw bytes behind a file URL.
    async fn download_asset(&self, url: &str) -> Result<Vec<u8>, AppError>;
}

pub use client::NotionHttpClient;
pub use memory::InMemoryRepository;
