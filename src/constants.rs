// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role. Published URLs depend on several of them, so changing
//! one changes the site's addresses.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// How many objects the Notion API returns per page of results.
///
/// The Notion API maximum is 100. We use the maximum to minimize
/// round-trips while resolving block trees.
pub const NOTION_API_PAGE_SIZE: usize = 100;

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// The fixed identity of the site's home page after load.
pub const INDEX_ID: &str = "index";

/// Characters of a sanitized page title kept in its short URL.
pub const TITLE_SLUG_MAX_LEN: usize = 10;

/// Characters of the page id used when a page has neither a short-URL
/// property nor a title.
pub const ID_SLUG_PREFIX_LEN: usize = 5;

/// Maximum length of a heading anchor before de-duplication suffixes.
pub const HEADING_SLUG_MAX_LEN: usize = 50;

// ---------------------------------------------------------------------------
// Cache and site layout
// ---------------------------------------------------------------------------

/// Directory, both in the cache and in the built site, holding downloaded
/// images. The only entry of the cache that is not a node document.
pub const ASSET_DIR_NAME: &str = "images";

/// Extension of one cached page or database document.
pub const CACHE_FILE_EXTENSION: &str = "json";

/// Placeholder shown for a page without a title.
pub const UNTITLED_PAGE: &str = "[Untitled Page]";

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
