// src/types/properties.rs
//! Page property values and database property schemas.

use super::colors::Color;
use super::rich_text::RichText;
use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// An option of a select or multi-select property. Tags are multi-select
/// options; pages reference them by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectOption {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: Color,
}

/// A date or date range. `start` is kept verbatim because Notion mixes
/// plain dates (`2024-03-01`) and timestamps in the same property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateValue {
    pub start: String,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub time_zone: Option<String>,
}

impl DateValue {
    pub fn new(start: impl Into<String>) -> Self {
        DateValue {
            start: start.into(),
            end: None,
            time_zone: None,
        }
    }

    /// The start as an instant. Plain dates are midnight UTC.
    pub fn start_instant(&self) -> Option<DateTime<FixedOffset>> {
        parse_notion_date(&self.start)
    }
}

/// Parses `YYYY-MM-DD` or an RFC 3339 timestamp.
pub fn parse_notion_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp);
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight).fixed_offset())
}

/// A property value on a page. `id` joins it to the database schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyValue {
    pub id: String,
    #[serde(flatten)]
    pub value: PropertyKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyKind {
    Title {
        title: Vec<RichText>,
    },
    #[serde(rename = "rich_text")]
    Text {
        rich_text: Vec<RichText>,
    },
    Date {
        date: Option<DateValue>,
    },
    MultiSelect {
        multi_select: Vec<SelectOption>,
    },
    Select {
        select: Option<SelectOption>,
    },
    Url {
        url: Option<String>,
    },
    Checkbox {
        checkbox: bool,
    },
    Number {
        number: Option<f64>,
    },
    /// Formulas, rollups, relations, people and the rest. The site never
    /// reads them.
    #[serde(other)]
    Other,
}

impl PropertyValue {
    pub fn title(&self) -> Option<&[RichText]> {
        match &self.value {
            PropertyKind::Title { title } => Some(title),
            _ => None,
        }
    }

    pub fn date(&self) -> Option<&DateValue> {
        match &self.value {
            PropertyKind::Date { date } => date.as_ref(),
            _ => None,
        }
    }

    pub fn multi_select(&self) -> Option<&[SelectOption]> {
        match &self.value {
            PropertyKind::MultiSelect { multi_select } => Some(multi_select),
            _ => None,
        }
    }

    /// Rich text of a title or text property; used for mention discovery.
    pub fn rich_text(&self) -> Option<&[RichText]> {
        match &self.value {
            PropertyKind::Title { title } => Some(title),
            PropertyKind::Text { rich_text } => Some(rich_text),
            _ => None,
        }
    }

    pub fn rich_text_mut(&mut self) -> Option<&mut Vec<RichText>> {
        match &mut self.value {
            PropertyKind::Title { title } => Some(title),
            PropertyKind::Text { rich_text } => Some(rich_text),
            _ => None,
        }
    }

    /// A text-ish value flattened to a string (title, text, url, select).
    pub fn as_plain_text(&self) -> Option<String> {
        match &self.value {
            PropertyKind::Title { title } => Some(super::rich_text::plain_text(title)),
            PropertyKind::Text { rich_text } => Some(super::rich_text::plain_text(rich_text)),
            PropertyKind::Url { url } => url.clone(),
            PropertyKind::Select { select } => select.as_ref().map(|s| s.name.clone()),
            _ => None,
        }
    }
}

/// A column of a database schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseProperty {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub kind: SchemaKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SchemaKind {
    Title,
    RichText,
    Date,
    MultiSelect { multi_select: SelectOptions },
    Select { select: SelectOptions },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectOptions {
    #[serde(default)]
    pub options: Vec<SelectOption>,
}

impl DatabaseProperty {
    pub fn options(&self) -> Option<&[SelectOption]> {
        match &self.kind {
            SchemaKind::MultiSelect { multi_select } => Some(&multi_select.options),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dates_accept_plain_and_timestamp_forms() {
        let plain = parse_notion_date("2024-03-01").unwrap();
        let stamped = parse_notion_date("2024-03-01T10:30:00.000+02:00").unwrap();
        assert!(stamped > plain);
        assert!(parse_notion_date("March 1st").is_none());
    }

    #[test]
    fn property_values_parse_by_type_tag() {
        let value: PropertyValue = serde_json::from_value(json!({
            "id": "a%3Bc",
            "type": "multi_select",
            "multi_select": [{ "id": "t1", "name": "Rust", "color": "orange" }]
        }))
        .unwrap();
        assert_eq!(value.multi_select().map(|tags| tags.len()), Some(1));

        let value: PropertyValue = serde_json::from_value(json!({
            "id": "zz", "type": "date", "date": null
        }))
        .unwrap();
        assert!(value.date().is_none());

        let value: PropertyValue = serde_json::from_value(json!({
            "id": "f", "type": "formula", "formula": { "type": "number", "number": 3 }
        }))
        .unwrap();
        assert_eq!(value.value, PropertyKind::Other);
    }

    #[test]
    fn schema_exposes_multi_select_options() {
        let property: DatabaseProperty = serde_json::from_value(json!({
            "id": "tags", "name": "Tags", "type": "multi_select",
            "multi_select": { "options": [
                { "id": "t1", "name": "Rust", "color": "orange" },
                { "id": "t2", "name": "Climbing", "color": "green" }
            ] }
        }))
        .unwrap();
        assert_eq!(property.options().map(|o| o.len()), Some(2));

        let property: DatabaseProperty = serde_json::from_value(json!({
            "id": "d", "name": "Publish Date", "type": "date", "date": {}
        }))
        .unwrap();
        assert_eq!(property.kind, SchemaKind::Date);
    }
}
