// src/model/blocks.rs
//! Payload structs for the block variants.

use crate::types::{Color, NotionId, RichText};
use serde::{Deserialize, Serialize};

/// Paragraphs, list items, quotes, toggles and templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default)]
    pub color: Color,
}

impl TextBlock {
    pub fn new(rich_text: Vec<RichText>) -> Self {
        TextBlock {
            rich_text,
            color: Color::Default,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingBlock {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub is_toggleable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToDoBlock {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalloutBlock {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default)]
    pub icon: Option<Icon>,
    #[serde(default)]
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Icon {
    Emoji { emoji: String },
    External { external: ExternalUrl },
    File { file: HostedFile },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeBlock {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub caption: Vec<RichText>,
}

/// Image, video, file, pdf and audio blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileBlock {
    #[serde(flatten)]
    pub source: FileSource,
    #[serde(default)]
    pub caption: Vec<RichText>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FileSource {
    /// A URL that stays valid (external, or localized into the asset dir).
    External { external: ExternalUrl },
    /// A Notion-hosted upload behind an expiring signed URL.
    File { file: HostedFile },
}

impl FileSource {
    pub fn url(&self) -> &str {
        match self {
            FileSource::External { external } => &external.url,
            FileSource::File { file } => &file.url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalUrl {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostedFile {
    pub url: String,
    #[serde(default)]
    pub expiry_time: Option<String>,
}

/// Bookmarks, embeds and link previews.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlBlock {
    pub url: String,
    #[serde(default)]
    pub caption: Vec<RichText>,
}

/// `child_page` and `child_database`: the block id is the node id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleBlock {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LinkTarget {
    PageId { page_id: NotionId },
    DatabaseId { database_id: NotionId },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableBlock {
    #[serde(default)]
    pub table_width: usize,
    #[serde(default)]
    pub has_column_header: bool,
    #[serde(default)]
    pub has_row_header: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRowBlock {
    #[serde(default)]
    pub cells: Vec<Vec<RichText>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncedBlock {
    #[serde(default)]
    pub synced_from: Option<SyncedFrom>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncedFrom {
    pub block_id: NotionId,
}
