// src/model/block.rs
//! The block tree.
//!
//! A block is stored in Notion's wire shape: common fields plus a `type` tag
//! whose payload sits under a key of the same name. The cache keeps that
//! shape and adds a recursive `children` array for container blocks.

use super::blocks::*;
use super::Parent;
use crate::types::{mentioned_nodes, EquationContent, NodeRef, NotionId, RichText};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: NotionId,
    pub parent: Parent,
    #[serde(default)]
    pub has_children: bool,
    #[serde(flatten)]
    pub content: BlockContent,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

/// Every block type the site understands. Anything else deserializes to
/// `Unsupported` and keeps its place in the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockContent {
    Paragraph {
        paragraph: TextBlock,
    },
    #[serde(rename = "heading_1")]
    Heading1 {
        heading_1: HeadingBlock,
    },
    #[serde(rename = "heading_2")]
    Heading2 {
        heading_2: HeadingBlock,
    },
    #[serde(rename = "heading_3")]
    Heading3 {
        heading_3: HeadingBlock,
    },
    BulletedListItem {
        bulleted_list_item: TextBlock,
    },
    NumberedListItem {
        numbered_list_item: TextBlock,
    },
    ToDo {
        to_do: ToDoBlock,
    },
    Toggle {
        toggle: TextBlock,
    },
    Quote {
        quote: TextBlock,
    },
    Callout {
        callout: CalloutBlock,
    },
    Code {
        code: CodeBlock,
    },
    Equation {
        equation: EquationContent,
    },
    Divider,
    Breadcrumb,
    TableOfContents,
    Image {
        image: FileBlock,
    },
    Video {
        video: FileBlock,
    },
    File {
        file: FileBlock,
    },
    Pdf {
        pdf: FileBlock,
    },
    Audio {
        audio: FileBlock,
    },
    Bookmark {
        bookmark: UrlBlock,
    },
    Embed {
        embed: UrlBlock,
    },
    LinkPreview {
        link_preview: UrlBlock,
    },
    ChildPage {
        child_page: TitleBlock,
    },
    ChildDatabase {
        child_database: TitleBlock,
    },
    LinkToPage {
        link_to_page: LinkTarget,
    },
    Table {
        table: TableBlock,
    },
    TableRow {
        table_row: TableRowBlock,
    },
    ColumnList,
    Column,
    #[serde(rename = "synced_block")]
    Synced {
        synced_block: SyncedBlock,
    },
    Template {
        template: TextBlock,
    },
    #[serde(other)]
    Unsupported,
}

impl Block {
    pub fn new(id: impl Into<NotionId>, parent: Parent, content: BlockContent) -> Self {
        Block {
            id: id.into(),
            parent,
            has_children: false,
            content,
            children: Vec::new(),
        }
    }

    pub fn paragraph(id: impl Into<NotionId>, parent: Parent, rich_text: Vec<RichText>) -> Self {
        Block::new(
            id,
            parent,
            BlockContent::Paragraph {
                paragraph: TextBlock::new(rich_text),
            },
        )
    }

    pub fn child_page(id: impl Into<NotionId>, parent: Parent, title: impl Into<String>) -> Self {
        Block::new(
            id,
            parent,
            BlockContent::ChildPage {
                child_page: TitleBlock {
                    title: title.into(),
                },
            },
        )
    }

    pub fn child_database(
        id: impl Into<NotionId>,
        parent: Parent,
        title: impl Into<String>,
    ) -> Self {
        Block::new(
            id,
            parent,
            BlockContent::ChildDatabase {
                child_database: TitleBlock {
                    title: title.into(),
                },
            },
        )
    }

    pub fn with_children(mut self, children: Vec<Block>) -> Self {
        self.has_children = !children.is_empty();
        self.children = children;
        self
    }

    /// The wire name of the block's type.
    pub fn block_type(&self) -> &'static str {
        match &self.content {
            BlockContent::Paragraph { .. } => "paragraph",
            BlockContent::Heading1 { .. } => "heading_1",
            BlockContent::Heading2 { .. } => "heading_2",
            BlockContent::Heading3 { .. } => "heading_3",
            BlockContent::BulletedListItem { .. } => "bulleted_list_item",
            BlockContent::NumberedListItem { .. } => "numbered_list_item",
            BlockContent::ToDo { .. } => "to_do",
            BlockContent::Toggle { .. } => "toggle",
            BlockContent::Quote { .. } => "quote",
            BlockContent::Callout { .. } => "callout",
            BlockContent::Code { .. } => "code",
            BlockContent::Equation { .. } => "equation",
            BlockContent::Divider => "divider",
            BlockContent::Breadcrumb => "breadcrumb",
            BlockContent::TableOfContents => "table_of_contents",
            BlockContent::Image { .. } => "image",
            BlockContent::Video { .. } => "video",
            BlockContent::File { .. } => "file",
            BlockContent::Pdf { .. } => "pdf",
            BlockContent::Audio { .. } => "audio",
            BlockContent::Bookmark { .. } => "bookmark",
            BlockContent::Embed { .. } => "embed",
            BlockContent::LinkPreview { .. } => "link_preview",
            BlockContent::ChildPage { .. } => "child_page",
            BlockContent::ChildDatabase { .. } => "child_database",
            BlockContent::LinkToPage { .. } => "link_to_page",
            BlockContent::Table { .. } => "table",
            BlockContent::TableRow { .. } => "table_row",
            BlockContent::ColumnList => "column_list",
            BlockContent::Column => "column",
            BlockContent::Synced { .. } => "synced_block",
            BlockContent::Template { .. } => "template",
            BlockContent::Unsupported => "unsupported",
        }
    }

    /// The block's main rich text, for the variants that have one.
    pub fn rich_text(&self) -> Option<&[RichText]> {
        match &self.content {
            BlockContent::Paragraph { paragraph: t }
            | BlockContent::BulletedListItem {
                bulleted_list_item: t,
            }
            | BlockContent::NumberedListItem {
                numbered_list_item: t,
            }
            | BlockContent::Toggle { toggle: t }
            | BlockContent::Quote { quote: t }
            | BlockContent::Template { template: t } => Some(&t.rich_text),
            BlockContent::Heading1 { heading_1: h }
            | BlockContent::Heading2 { heading_2: h }
            | BlockContent::Heading3 { heading_3: h } => Some(&h.rich_text),
            BlockContent::ToDo { to_do } => Some(&to_do.rich_text),
            BlockContent::Callout { callout } => Some(&callout.rich_text),
            BlockContent::Code { code } => Some(&code.rich_text),
            _ => None,
        }
    }

    /// Every run of rich text the block carries: body, captions, table cells.
    fn all_rich_text(&self) -> Vec<&[RichText]> {
        let mut runs: Vec<&[RichText]> = self.rich_text().into_iter().collect();
        match &self.content {
            BlockContent::Code { code } => runs.push(&code.caption),
            BlockContent::Image { image: f }
            | BlockContent::Video { video: f }
            | BlockContent::File { file: f }
            | BlockContent::Pdf { pdf: f }
            | BlockContent::Audio { audio: f } => runs.push(&f.caption),
            BlockContent::Bookmark { bookmark: u } | BlockContent::Embed { embed: u } => {
                runs.push(&u.caption)
            }
            BlockContent::TableRow { table_row } => {
                runs.extend(table_row.cells.iter().map(Vec::as_slice))
            }
            _ => {}
        }
        runs
    }

    fn all_rich_text_mut(&mut self) -> Vec<&mut Vec<RichText>> {
        match &mut self.content {
            BlockContent::Paragraph { paragraph: t }
            | BlockContent::BulletedListItem {
                bulleted_list_item: t,
            }
            | BlockContent::NumberedListItem {
                numbered_list_item: t,
            }
            | BlockContent::Toggle { toggle: t }
            | BlockContent::Quote { quote: t }
            | BlockContent::Template { template: t } => vec![&mut t.rich_text],
            BlockContent::Heading1 { heading_1: h }
            | BlockContent::Heading2 { heading_2: h }
            | BlockContent::Heading3 { heading_3: h } => vec![&mut h.rich_text],
            BlockContent::ToDo { to_do } => vec![&mut to_do.rich_text],
            BlockContent::Callout { callout } => vec![&mut callout.rich_text],
            BlockContent::Code { code } => vec![&mut code.rich_text, &mut code.caption],
            BlockContent::Image { image: f }
            | BlockContent::Video { video: f }
            | BlockContent::File { file: f }
            | BlockContent::Pdf { pdf: f }
            | BlockContent::Audio { audio: f } => vec![&mut f.caption],
            BlockContent::Bookmark { bookmark: u } | BlockContent::Embed { embed: u } => {
                vec![&mut u.caption]
            }
            BlockContent::TableRow { table_row } => table_row.cells.iter_mut().collect(),
            _ => Vec::new(),
        }
    }

    /// Rewrites every pointer at page `old` this block holds: its own id
    /// when it is the `child_page` stub, its parent, a page link, mentions.
    pub fn remap_page(&mut self, old: &NotionId, new: &NotionId) {
        if self.id == *old && matches!(self.content, BlockContent::ChildPage { .. }) {
            self.id = new.clone();
        }
        self.parent.remap_page(old, new);
        if let BlockContent::LinkToPage {
            link_to_page: LinkTarget::PageId { page_id },
        } = &mut self.content
        {
            if page_id == old {
                *page_id = new.clone();
            }
        }
        for run in self.all_rich_text_mut() {
            for item in run.iter_mut() {
                item.remap_mention(old, new);
            }
        }
    }

    /// Pages and databases this block points at, directly or via mentions.
    pub fn referenced_nodes(&self) -> Vec<NodeRef> {
        let mut refs = Vec::new();
        match &self.content {
            BlockContent::ChildPage { .. } => refs.push(NodeRef::Page(self.id.clone())),
            BlockContent::ChildDatabase { .. } => refs.push(NodeRef::Database(self.id.clone())),
            BlockContent::LinkToPage {
                link_to_page: LinkTarget::PageId { page_id },
            } => refs.push(NodeRef::Page(page_id.clone())),
            BlockContent::LinkToPage {
                link_to_page: LinkTarget::DatabaseId { database_id },
            } => refs.push(NodeRef::Database(database_id.clone())),
            _ => {}
        }
        for run in self.all_rich_text() {
            refs.extend(mentioned_nodes(run));
        }
        refs
    }

    /// `child_page` and `child_database` blocks stand in for nodes with their
    /// own cache entry; their content is never inlined into the parent.
    pub fn is_node_reference(&self) -> bool {
        matches!(
            self.content,
            BlockContent::ChildPage { .. } | BlockContent::ChildDatabase { .. }
        )
    }

    /// Whether the transport must be asked for this block's children.
    pub fn needs_children(&self) -> bool {
        self.has_children && !self.is_node_reference()
    }

    pub fn heading_level(&self) -> Option<u8> {
        match &self.content {
            BlockContent::Heading1 { .. } => Some(1),
            BlockContent::Heading2 { .. } => Some(2),
            BlockContent::Heading3 { .. } => Some(3),
            _ => None,
        }
    }
}

/// Breadth-first walk over a forest of blocks.
pub fn walk_bfs(roots: &[Block]) -> impl Iterator<Item = &Block> {
    let mut queue: VecDeque<&Block> = roots.iter().collect();
    std::iter::from_fn(move || {
        let block = queue.pop_front()?;
        queue.extend(block.children.iter());
        Some(block)
    })
}

/// Applies `visit` to every block of a forest, depth-first.
pub fn visit_blocks_mut<F>(roots: &mut [Block], visit: &mut F)
where
    F: FnMut(&mut Block),
{
    for block in roots.iter_mut() {
        visit(block);
        visit_blocks_mut(&mut block.children, visit);
    }
}
