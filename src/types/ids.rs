// src/types/ids.rs
//! Node identifiers.
//!
//! Notion hands out the same id in two spellings: 32 compact hex characters
//! or the 36 character dashed UUID form. Every id is run through
//! [`normalize_id`] before it is used as a map key, so the two spellings can
//! never address two different entries.

use super::ValidationError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use uuid::Uuid;

/// Canonicalizes an identifier.
///
/// A 32 character input gets dashes inserted at 8/12/16/20. Anything else is
/// returned unchanged, which keeps the function total and idempotent
/// (`"index"` and already-dashed ids pass straight through).
pub fn normalize_id(raw: &str) -> String {
    if raw.len() == 32 && raw.is_ascii() {
        format!(
            "{}-{}-{}-{}-{}",
            &raw[0..8],
            &raw[8..12],
            &raw[12..16],
            &raw[16..20],
            &raw[20..32]
        )
    } else {
        raw.to_string()
    }
}

/// A normalized node identifier for a page, database or block.
///
/// Construction always normalizes, including deserialization, so ids read
/// from the API or from the cache are directly comparable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotionId(String);

impl NotionId {
    /// The canonical identity of the site's home page after the root remap.
    pub const INDEX: &'static str = crate::constants::INDEX_ID;

    /// Wraps a raw id, normalizing it. Never fails.
    pub fn new(raw: impl AsRef<str>) -> Self {
        NotionId(normalize_id(raw.as_ref()))
    }

    /// The `"index"` id.
    pub fn index() -> Self {
        NotionId(Self::INDEX.to_string())
    }

    pub fn is_index(&self) -> bool {
        self.0 == Self::INDEX
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Strict parser for user input: dashed or compact UUIDs and Notion URLs.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let cleaned = input.trim().trim_end_matches('/');

        if let Ok(uuid) = Uuid::parse_str(cleaned) {
            return Ok(NotionId::new(uuid.as_simple().to_string()));
        }

        if cleaned.contains("notion") {
            return Self::extract_from_url(cleaned);
        }

        Err(ValidationError::InvalidId(format!(
            "Could not parse Notion ID from: {}",
            input
        )))
    }

    fn extract_from_url(url: &str) -> Result<Self, ValidationError> {
        lazy_static::lazy_static! {
            static ref ID_REGEX: Regex = Regex::new(
                r"(?:[/-])([a-fA-F0-9]{32}|[a-fA-F0-9]{8}-[a-fA-F0-9]{4}-[a-fA-F0-9]{4}-[a-fA-F0-9]{4}-[a-fA-F0-9]{12})(?:[/?#]|$)"
            ).expect("Notion ID regex is valid");
        }

        ID_REGEX
            .captures(url)
            .and_then(|captures| captures.get(1))
            .map(|id| NotionId::new(id.as_str().replace('-', "").to_lowercase()))
            .ok_or_else(|| {
                ValidationError::InvalidId(format!("No valid ID found in URL: {}", url))
            })
    }

    /// First `n` characters, lowercased. Used for fallback short URLs.
    pub fn short_prefix(&self, n: usize) -> String {
        self.0.chars().take(n).collect::<String>().to_lowercase()
    }
}

impl fmt::Display for NotionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for NotionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NotionId {
    fn from(raw: &str) -> Self {
        NotionId::new(raw)
    }
}

impl From<String> for NotionId {
    fn from(raw: String) -> Self {
        NotionId::new(raw)
    }
}

impl Serialize for NotionId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for NotionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(NotionId::new(raw))
    }
}

/// A reference to a node that owns its own cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeRef {
    Page(NotionId),
    Database(NotionId),
}

impl NodeRef {
    pub fn id(&self) -> &NotionId {
        match self {
            NodeRef::Page(id) | NodeRef::Database(id) => id,
        }
    }
}
