// src/render/sitemap.rs
//! `sitemap.xml`.
//!
//! Lists every page except the drafts of the root database: a page is in
//! when it has no publish-date property at all (it is not a post) or when
//! the date is set.

use super::paths::SitePath;
use super::xml;
use crate::error::AppError;
use crate::types::parse_notion_date;
use crate::view::{short_url, ViewEngine};
use chrono::{DateTime, FixedOffset};

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SitemapEntry {
    pub url: String,
    pub lastmod: Option<DateTime<FixedOffset>>,
}

/// Sitemap entries sorted by URL.
pub fn sitemap_entries(view: &ViewEngine<'_>) -> Vec<SitemapEntry> {
    let site = view.site();
    let graph = view.graph();
    let column = graph
        .database(&site.root_database_id)
        .and_then(|database| view.publish_date_column(database));

    let mut entries: Vec<SitemapEntry> = graph
        .pages()
        .filter_map(|page| {
            let lastmod = match column.and_then(|column| page.property_by_id(column)) {
                None => None,
                Some(property) => {
                    let date = property.date()?;
                    parse_notion_date(&date.start)
                }
            };
            let short = short_url(page, &site.short_url_property);
            Some(SitemapEntry {
                url: site.absolute_url(&SitePath::Page { short_url: &short }.relative()),
                lastmod,
            })
        })
        .collect();

    entries.sort();
    entries
}

pub fn render_sitemap(view: &ViewEngine<'_>) -> Result<String, AppError> {
    let entries = sitemap_entries(view);
    log::debug!("Sitemap lists {} pages", entries.len());

    let mut writer = xml::document()?;
    xml::start(&mut writer, "urlset", &[("xmlns", SITEMAP_NS)])?;
    for entry in &entries {
        xml::start(&mut writer, "url", &[])?;
        xml::text_element(&mut writer, "loc", &entry.url)?;
        if let Some(lastmod) = entry.lastmod {
            xml::text_element(&mut writer, "lastmod", &lastmod.format("%Y-%m-%d").to_string())?;
        }
        xml::end(&mut writer, "url")?;
    }
    xml::end(&mut writer, "urlset")?;
    xml::finish(writer, &SitePath::Sitemap.relative())
}
