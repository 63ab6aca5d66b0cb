// src/config.rs
use crate::error::AppError;
use crate::types::{ApiKey, NotionId, TagName};
use clap::{Parser, Subcommand};
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable holding the Notion integration token.
pub const API_KEY_ENV: &str = "NOTION_API_KEY";

/// Parsed and validated command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    #[command(subcommand)]
    pub command: Command,

    /// Site configuration file (JSON)
    #[arg(long, global = true, default_value = "site.json")]
    pub config: PathBuf,

    /// Directory holding the fetched content between `fetch` and `build`
    #[arg(long, global = true, default_value = "cache")]
    pub cache_dir: PathBuf,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Clear the cache and download every page reachable from the root page
    Fetch {
        /// Keep Notion-hosted image URLs instead of downloading the images
        #[arg(long, default_value_t = false)]
        skip_images: bool,
    },
    /// Render the cached content into a static site
    Build {
        /// Output directory, deleted and recreated on every build
        #[arg(long, default_value = "dist")]
        out_dir: PathBuf,
    },
}

/// Site-level settings, read from the JSON configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    pub root_page_id: NotionId,
    pub root_database_id: NotionId,
    pub site_url: String,
    pub title: String,
    #[serde(default = "default_publish_date_property")]
    pub publish_date_property: String,
    #[serde(default = "default_short_url_property")]
    pub short_url_property: String,
    /// Tag option id to public tag name. Only these tags get pages and feeds.
    #[serde(default)]
    pub tags: IndexMap<String, TagName>,
    #[serde(default)]
    pub header_page_ids: Vec<NotionId>,
    #[serde(default = "default_home_name")]
    pub home_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
    /// Buttondown account name; enables the newsletter pages.
    #[serde(default)]
    pub newsletter_id: Option<String>,
    /// Plausible domain; enables the analytics snippet.
    #[serde(default)]
    pub analytics_domain: Option<String>,
    #[serde(default)]
    pub favicon_path: Option<String>,
}

fn default_publish_date_property() -> String {
    "Publish Date".to_string()
}

fn default_short_url_property() -> String {
    "short url".to_string()
}

fn default_home_name() -> String {
    "home".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

impl SiteConfig {
    /// A configuration with every optional setting at its default.
    pub fn new(
        root_page_id: impl Into<NotionId>,
        root_database_id: impl Into<NotionId>,
        site_url: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        SiteConfig {
            root_page_id: root_page_id.into(),
            root_database_id: root_database_id.into(),
            site_url: site_url.into(),
            title: title.into(),
            publish_date_property: default_publish_date_property(),
            short_url_property: default_short_url_property(),
            tags: IndexMap::new(),
            header_page_ids: Vec::new(),
            home_name: default_home_name(),
            description: None,
            author: None,
            language: default_language(),
            newsletter_id: None,
            analytics_domain: None,
            favicon_path: None,
        }
    }

    /// Reads and validates the configuration file.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::MissingConfiguration(format!(
                "cannot read site configuration {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&raw, path)
    }

    /// Parses and validates configuration text. `path` is only used in errors.
    pub fn from_json(raw: &str, path: &Path) -> Result<Self, AppError> {
        let mut config: SiteConfig =
            serde_json::from_str(raw).map_err(|e| AppError::InvalidConfiguration {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        config.site_url = config.site_url.trim_end_matches('/').to_string();
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<(), AppError> {
        if self.root_page_id.as_str().is_empty() {
            return Err(AppError::MissingConfiguration(
                "root_page_id must not be empty".to_string(),
            ));
        }
        if self.root_database_id.as_str().is_empty() {
            return Err(AppError::MissingConfiguration(
                "root_database_id must not be empty".to_string(),
            ));
        }
        if self.title.trim().is_empty() {
            return Err(AppError::MissingConfiguration(
                "title must not be empty".to_string(),
            ));
        }
        url::Url::parse(&self.site_url).map_err(|e| AppError::InvalidConfiguration {
            path: path.to_path_buf(),
            reason: format!("site_url {:?} is not a URL: {}", self.site_url, e),
        })?;
        Ok(())
    }

    /// The public name of a tag option, when the site routes it.
    pub fn tag_name(&self, tag_id: &str) -> Option<&TagName> {
        self.tags.get(tag_id)
    }

    /// Absolute URL of a site-relative path.
    pub fn absolute_url(&self, site_path: &str) -> String {
        format!("{}/{}", self.site_url, site_path.trim_start_matches('/'))
    }
}

/// Everything the `fetch` step needs.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub api_key: ApiKey,
    pub root_page_id: NotionId,
    pub cache_dir: PathBuf,
    pub localize_images: bool,
}

/// Everything the `build` step needs.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub site: SiteConfig,
    pub cache_dir: PathBuf,
    pub out_dir: PathBuf,
}

/// Resolved configuration for one invocation.
#[derive(Debug, Clone)]
pub enum RunConfig {
    Fetch(FetchConfig),
    Build(BuildConfig),
}

impl RunConfig {
    /// Resolves a complete configuration from CLI input and environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        Self::resolve_with_api_key(cli, std::env::var(API_KEY_ENV).ok())
    }

    /// Like [`RunConfig::resolve`], with the API key passed in.
    pub fn resolve_with_api_key(
        cli: CommandLineInput,
        api_key: Option<String>,
    ) -> Result<Self, AppError> {
        let site = SiteConfig::load(&cli.config)?;

        match cli.command {
            Command::Fetch { skip_images } => {
                let api_key = api_key.ok_or_else(|| {
                    AppError::MissingConfiguration(format!(
                        "{} environment variable not set",
                        API_KEY_ENV
                    ))
                })?;
                Ok(RunConfig::Fetch(FetchConfig {
                    api_key: ApiKey::new(api_key)?,
                    root_page_id: site.root_page_id,
                    cache_dir: cli.cache_dir,
                    localize_images: !skip_images,
                }))
            }
            Command::Build { out_dir } => Ok(RunConfig::Build(BuildConfig {
                site,
                cache_dir: cli.cache_dir,
                out_dir,
            })),
        }
    }
}
