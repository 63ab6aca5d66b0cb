// src/types/domain_types.rs
//! Validated newtypes for configuration values.

use super::ValidationError;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// API key for Notion API authentication
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Create a new API key with validation
    pub fn new(key: impl Into<String>) -> Result<Self, ValidationError> {
        let key = key.into();

        if key.is_empty() {
            return Err(ValidationError::InvalidApiKey {
                reason: "API key cannot be empty".to_string(),
            });
        }

        if !key.starts_with("secret_") && !key.starts_with("ntn_") {
            return Err(ValidationError::InvalidApiKey {
                reason: "API key must start with 'secret_' or 'ntn_'".to_string(),
            });
        }

        if key.len() < 20 {
            return Err(ValidationError::InvalidApiKey {
                reason: "API key is too short".to_string(),
            });
        }

        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Redact API key in display
        write!(f, "{}...", &self.0[..10])
    }
}

/// Public, URL-safe name for a tag (`rust`, `climbing-trips`). Stable across
/// rebuilds because it comes from site configuration, not from Notion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TagName(String);

impl TagName {
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        lazy_static! {
            static ref URL_SAFE: Regex = Regex::new(r"^[a-z0-9-]+$").expect("tag regex is valid");
        }

        let name = name.into();
        if !URL_SAFE.is_match(&name) {
            return Err(ValidationError::InvalidTagName {
                name,
                reason: "only lowercase letters, digits and '-' are allowed".to_string(),
            });
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for TagName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        TagName::new(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_validation() {
        assert!(ApiKey::new("secret_abcdefghijklmnopqrstuvwxyz").is_ok());
        assert!(ApiKey::new("ntn_abcdefghijklmnopqrstuvwxyz").is_ok());
        assert!(ApiKey::new("").is_err());
        assert!(ApiKey::new("bearer_abcdefghijklmnopqrstuvwxyz").is_err());
        assert!(ApiKey::new("secret_short").is_err());
    }

    #[test]
    fn api_key_display_is_redacted() {
        let key = ApiKey::new("secret_abcdefghijklmnopqrstuvwxyz").unwrap();
        assert_eq!(key.to_string(), "secret_abc...");
    }

    #[test]
    fn tag_names_must_be_url_safe() {
        assert!(TagName::new("climbing-trips").is_ok());
        assert!(TagName::new("Climbing").is_err());
        assert!(TagName::new("a/b").is_err());
        assert!(TagName::new("").is_err());
    }
}
