// src/model/mod.rs
//! Pages, databases and blocks as fetched from Notion and stored in the cache.

mod block;
pub mod blocks;

pub use block::{visit_blocks_mut, walk_bfs, Block, BlockContent};
pub use blocks::*;

use crate::types::{plain_text, DatabaseProperty, NotionId, PropertyValue, RichText, SelectOption};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A cache document: one page or database, tagged by Notion's `object` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "object", rename_all = "snake_case")]
pub enum NotionObject {
    Page(Page),
    Database(Database),
}

impl NotionObject {
    pub fn id(&self) -> &NotionId {
        match self {
            NotionObject::Page(page) => &page.id,
            NotionObject::Database(database) => &database.id,
        }
    }

    pub fn object_type_name(&self) -> &'static str {
        match self {
            NotionObject::Page(_) => "page",
            NotionObject::Database(_) => "database",
        }
    }
}

/// A Notion page with its resolved block tree in `children`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: NotionId,
    pub parent: Parent,
    #[serde(default)]
    pub properties: IndexMap<String, PropertyValue>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub children: Vec<Block>,
}

impl Page {
    pub fn new(id: impl Into<NotionId>, parent: Parent) -> Self {
        Page {
            id: id.into(),
            parent,
            properties: IndexMap::new(),
            url: None,
            children: Vec::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: PropertyValue) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    pub fn with_children(mut self, children: Vec<Block>) -> Self {
        self.children = children;
        self
    }

    /// The page's title rich text. At most one property is title-typed.
    pub fn title_property(&self) -> Option<&[RichText]> {
        self.properties.values().find_map(PropertyValue::title)
    }

    /// The title as plain text, `None` when missing or blank.
    pub fn title(&self) -> Option<String> {
        self.title_property()
            .map(plain_text)
            .map(|title| title.trim().to_string())
            .filter(|title| !title.is_empty())
    }

    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    /// Looks a property up by its schema id rather than its display name.
    pub fn property_by_id(&self, id: &str) -> Option<&PropertyValue> {
        self.properties.values().find(|property| property.id == id)
    }

    /// The page's tags: the options of its first multi-select property.
    pub fn tags(&self) -> &[SelectOption] {
        self.properties
            .values()
            .find_map(PropertyValue::multi_select)
            .unwrap_or(&[])
    }
}

/// A Notion database. `children` holds member page ids and is rebuilt on
/// every load, so it is never written to the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Database {
    pub id: NotionId,
    pub parent: Parent,
    #[serde(default)]
    pub title: Vec<RichText>,
    #[serde(default)]
    pub properties: IndexMap<String, DatabaseProperty>,
    #[serde(default, skip_serializing)]
    pub children: Vec<NotionId>,
}

impl Database {
    pub fn new(id: impl Into<NotionId>, parent: Parent) -> Self {
        Database {
            id: id.into(),
            parent,
            title: Vec::new(),
            properties: IndexMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = vec![RichText::plain(title)];
        self
    }

    pub fn with_property(mut self, property: DatabaseProperty) -> Self {
        self.properties.insert(property.name.clone(), property);
        self
    }

    pub fn title_text(&self) -> String {
        plain_text(&self.title)
    }

    /// The options of the first multi-select column.
    pub fn tag_options(&self) -> &[SelectOption] {
        self.properties
            .values()
            .find_map(DatabaseProperty::options)
            .unwrap_or(&[])
    }
}

/// Where a node hangs in the workspace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Parent {
    #[serde(rename = "page_id")]
    Page { page_id: NotionId },
    #[serde(rename = "database_id")]
    Database { database_id: NotionId },
    #[serde(rename = "block_id")]
    Block { block_id: NotionId },
    #[serde(rename = "workspace")]
    Workspace,
}

impl Parent {
    pub fn page(id: impl Into<NotionId>) -> Self {
        Parent::Page { page_id: id.into() }
    }

    pub fn database(id: impl Into<NotionId>) -> Self {
        Parent::Database {
            database_id: id.into(),
        }
    }

    pub fn block(id: impl Into<NotionId>) -> Self {
        Parent::Block {
            block_id: id.into(),
        }
    }

    /// The id this parent points at, if any.
    pub fn id(&self) -> Option<&NotionId> {
        match self {
            Parent::Page { page_id } => Some(page_id),
            Parent::Database { database_id } => Some(database_id),
            Parent::Block { block_id } => Some(block_id),
            Parent::Workspace => None,
        }
    }

    /// Rewrites a page parent from `old` to `new`. Returns whether it changed.
    pub fn remap_page(&mut self, old: &NotionId, new: &NotionId) -> bool {
        match self {
            Parent::Page { page_id } if page_id == old => {
                *page_id = new.clone();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PropertyKind, SchemaKind, SelectOptions};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn cache_documents_dispatch_on_object() {
        let page: NotionObject = serde_json::from_value(json!({
            "object": "page",
            "id": "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
            "parent": { "type": "workspace", "workspace": true },
            "properties": {
                "Name": { "id": "title", "type": "title",
                          "title": [{ "type": "text", "text": { "content": "Home" }, "plain_text": "Home" }] }
            },
            "children": []
        }))
        .unwrap();

        match &page {
            NotionObject::Page(page) => {
                assert_eq!(page.title().as_deref(), Some("Home"));
                assert_eq!(page.parent, Parent::Workspace);
            }
            other => panic!("expected a page, got {:?}", other),
        }

        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["object"], "page");
    }

    #[test]
    fn database_children_are_not_persisted() {
        let mut db = Database::new("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb", Parent::Workspace)
            .with_title("Posts");
        db.children.push(NotionId::new("cccccccccccccccccccccccccccccccc"));

        let json = serde_json::to_value(NotionObject::Database(db)).unwrap();
        assert_eq!(json["object"], "database");
        assert!(json.get("children").is_none());
    }

    #[test]
    fn blank_titles_read_as_missing() {
        let page = Page::new("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", Parent::Workspace).with_property(
            "Name",
            PropertyValue {
                id: "title".into(),
                value: PropertyKind::Title {
                    title: vec![RichText::plain("   ")],
                },
            },
        );
        assert_eq!(page.title(), None);
    }

    #[test]
    fn tag_options_come_from_the_multi_select_column() {
        let db = Database::new("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb", Parent::Workspace).with_property(
            DatabaseProperty {
                id: "t".into(),
                name: "Tags".into(),
                kind: SchemaKind::MultiSelect {
                    multi_select: SelectOptions {
                        options: vec![SelectOption {
                            id: "rust".into(),
                            name: "Rust".into(),
                            color: Default::default(),
                        }],
                    },
                },
            },
        );
        assert_eq!(db.tag_options().len(), 1);
    }

    #[test]
    fn remap_only_touches_matching_page_parents() {
        let old = NotionId::new("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
        let mut parent = Parent::page(old.clone());
        assert!(parent.remap_page(&old, &NotionId::index()));
        assert_eq!(parent, Parent::page("index"));

        let mut db_parent = Parent::database(old.clone());
        assert!(!db_parent.remap_page(&old, &NotionId::index()));
    }
}
