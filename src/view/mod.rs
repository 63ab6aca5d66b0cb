// src/view/mod.rs
//! Derived data the renderers consume: short URLs, heading anchors and
//! database listings.

mod database_view;
mod heading_slugs;
mod short_url;

pub use database_view::{Adjacent, DbView, DbViewOptions, PageTag, ViewEngine};
pub use heading_slugs::{slugify, HeadingSlugger};
pub use short_url::short_url;
