// src/types/rich_text.rs
//! Rich text segments as the Notion API serializes them.
//!
//! Each segment carries a `type` tag and a payload under the key of the same
//! name (`{"type": "mention", "mention": {...}}`), which maps directly onto
//! an internally tagged enum with one struct field per variant.

use super::colors::Color;
use super::ids::{NodeRef, NotionId};
use super::properties::DateValue;
use serde::{Deserialize, Serialize};

/// One run of styled text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichText {
    #[serde(flatten)]
    pub content: RichTextContent,
    #[serde(default)]
    pub annotations: Annotations,
    #[serde(default)]
    pub plain_text: String,
    #[serde(default)]
    pub href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RichTextContent {
    Text { text: TextContent },
    Mention { mention: Mention },
    Equation { equation: EquationContent },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    pub content: String,
    #[serde(default)]
    pub link: Option<Link>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquationContent {
    pub expression: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Mention {
    Page { page: ObjectReference },
    Database { database: ObjectReference },
    Date { date: DateValue },
    LinkPreview { link_preview: Link },
    /// Users, template mentions and anything newer; rendered from `plain_text`.
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectReference {
    pub id: NotionId,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    pub color: Color,
}

impl RichText {
    /// Plain, unannotated text. Mostly useful for building fixtures.
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        RichText {
            content: RichTextContent::Text {
                text: TextContent {
                    content: text.clone(),
                    link: None,
                },
            },
            annotations: Annotations::default(),
            plain_text: text,
            href: None,
        }
    }

    /// A page mention pointing at `id`.
    pub fn page_mention(id: NotionId, text: impl Into<String>) -> Self {
        RichText {
            content: RichTextContent::Mention {
                mention: Mention::Page {
                    page: ObjectReference { id },
                },
            },
            annotations: Annotations::default(),
            plain_text: text.into(),
            href: None,
        }
    }

    /// The node this segment mentions, if it is a page or database mention.
    pub fn mentioned_node(&self) -> Option<NodeRef> {
        match &self.content {
            RichTextContent::Mention {
                mention: Mention::Page { page },
            } => Some(NodeRef::Page(page.id.clone())),
            RichTextContent::Mention {
                mention: Mention::Database { database },
            } => Some(NodeRef::Database(database.id.clone())),
            _ => None,
        }
    }

    /// Points a page mention of `old` at `new`. Returns whether it changed.
    pub fn remap_mention(&mut self, old: &NotionId, new: &NotionId) -> bool {
        match &mut self.content {
            RichTextContent::Mention {
                mention: Mention::Page { page },
            } if page.id == *old => {
                page.id = new.clone();
                true
            }
            _ => false,
        }
    }
}

/// Concatenates the plain text of every segment.
pub fn plain_text(items: &[RichText]) -> String {
    items.iter().map(|item| item.plain_text.as_str()).collect()
}

/// Page and database mentions across a run of rich text, in order.
pub fn mentioned_nodes(items: &[RichText]) -> impl Iterator<Item = NodeRef> + '_ {
    items.iter().filter_map(RichText::mentioned_node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn parses_text_segments() {
        let item: RichText = serde_json::from_value(json!({
            "type": "text",
            "text": { "content": "Hello", "link": { "url": "https://example.com" } },
            "annotations": { "bold": true, "italic": false, "strikethrough": false,
                             "underline": false, "code": false, "color": "red" },
            "plain_text": "Hello",
            "href": "https://example.com"
        }))
        .unwrap();

        assert!(item.annotations.bold);
        assert_eq!(item.annotations.color, Color::Red);
        match item.content {
            RichTextContent::Text { text } => {
                assert_eq!(text.link.map(|l| l.url).as_deref(), Some("https://example.com"))
            }
            other => panic!("unexpected content {:?}", other),
        }
    }

    #[test]
    fn page_and_database_mentions_are_discovered() {
        let items: Vec<RichText> = serde_json::from_value(json!([
            { "type": "text", "text": { "content": "see " }, "plain_text": "see " },
            { "type": "mention",
              "mention": { "type": "page", "page": { "id": "11111111111111111111111111111111" } },
              "plain_text": "Other page" },
            { "type": "mention",
              "mention": { "type": "database", "database": { "id": "22222222-2222-2222-2222-222222222222" } },
              "plain_text": "Posts" },
            { "type": "mention",
              "mention": { "type": "user", "user": { "object": "user", "id": "u1" } },
              "plain_text": "@someone" }
        ]))
        .unwrap();

        let found: Vec<NodeRef> = mentioned_nodes(&items).collect();
        assert_eq!(
            found,
            vec![
                NodeRef::Page(NotionId::new("11111111-1111-1111-1111-111111111111")),
                NodeRef::Database(NotionId::new("22222222-2222-2222-2222-222222222222")),
            ]
        );
        assert_eq!(plain_text(&items), "see Other pagePosts@someone");
    }
}
