// src/types/mod.rs
//! Value types shared by every layer: ids, rich text, properties, colors.

use thiserror::Error;

mod colors;
mod domain_types;
mod ids;
mod properties;
mod rich_text;

pub use colors::*;
pub use domain_types::*;
pub use ids::*;
pub use properties::*;
pub use rich_text::*;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid Notion ID format: {0}")]
    InvalidId(String),

    #[error("Invalid API key format: {reason}")]
    InvalidApiKey { reason: String },

    #[error("Invalid tag name: {name} - {reason}")]
    InvalidTagName { name: String, reason: String },

    #[error("Invalid URL: {url} - {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Empty required field: {0}")]
    EmptyField(&'static str),
}
