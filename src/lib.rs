// src/lib.rs
//! notion-site library: builds a static website from a Notion workspace.
//!
//! The work happens in two steps that share nothing but the cache
//! directory:
//!
//! - **fetch**: [`Crawler`] walks every page and database reachable from the
//!   root page through a [`NotionRepository`] and writes one JSON document
//!   per node into a [`ContentStore`].
//! - **build**: [`load_graph`] links the cached nodes into a
//!   [`ContentGraph`], the [`ViewEngine`] answers listing and navigation
//!   queries, and [`render_site`] turns it all into an [`OutputPlan`] that
//!   [`deliver`] writes out.

pub mod api;
pub mod config;
pub mod constants;
pub mod crawl;
pub mod error;
pub mod error_recovery;
pub mod graph;
pub mod model;
pub mod output;
pub mod render;
pub mod store;
pub mod types;
pub mod view;

// --- Error Handling ---
pub use crate::error::{AppError, NotionErrorCode};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{BuildConfig, CommandLineInput, FetchConfig, RunConfig, SiteConfig};

// --- Domain Model ---
pub use crate::model::{Block, BlockContent, Database, NotionObject, Page, Parent};
pub use crate::types::{normalize_id, ApiKey, NotionId, RichText, TagName};

// --- Fetch ---
pub use crate::api::{InMemoryRepository, NotionHttpClient, NotionRepository};
pub use crate::crawl::{CrawlOptions, CrawlReport, Crawler, Frontier};
pub use crate::store::ContentStore;

// --- Build ---
pub use crate::graph::{breadcrumbs, load_graph, Breadcrumb, BreadcrumbKind, ContentGraph};
pub use crate::output::{deliver, reset_directory, DeliveryTarget, OutputPlan, OutputReport};
pub use crate::render::{render_site, SitePath, SiteRenderer};
pub use crate::view::{short_url, DbView, DbViewOptions, HeadingSlugger, ViewEngine};
