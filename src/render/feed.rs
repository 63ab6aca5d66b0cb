// src/render/feed.rs
//! RSS 2.0 and Atom 1.0 feeds of the root database, optionally narrowed to
//! one tag.
//!
//! Items come straight from the listing query, so a feed always matches
//! the listing page it accompanies.

use super::paths::{FeedKind, SitePath};
use super::xml::{self, XmlWriter};
use crate::error::AppError;
use crate::model::Page;
use crate::types::TagName;
use crate::view::{short_url, DbViewOptions, ViewEngine};
use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use rss::{validation::Validate, ChannelBuilder, GuidBuilder, ItemBuilder};

const ATOM_NS: &str = "http://www.w3.org/2005/Atom";

/// A tag that has its own feeds: the option id pages carry, and the public
/// name used in paths.
#[derive(Debug, Clone, Copy)]
pub struct FeedTag<'a> {
    pub id: &'a str,
    pub name: &'a TagName,
}

#[derive(Debug, Clone)]
pub struct FeedEntry<'g> {
    pub page: &'g Page,
    pub title: String,
    pub url: String,
    pub published: DateTime<FixedOffset>,
}

/// Both feeds for the root database, or for one tag of it.
pub fn render_feeds<'a>(
    view: &ViewEngine<'_>,
    tag: Option<FeedTag<'a>>,
) -> Result<Vec<(SitePath<'a>, String)>, AppError> {
    let name = tag.map(|tag| tag.name);
    let rss_path = SitePath::Feed {
        kind: FeedKind::Rss,
        tag: name,
    };
    let atom_path = SitePath::Feed {
        kind: FeedKind::Atom,
        tag: name,
    };

    let entries = feed_entries(view, tag, &rss_path.relative())?;
    log::debug!("Feeds {} / {}: {} entries", rss_path, atom_path, entries.len());

    let rss = render_rss(view, &entries, name, &rss_path.relative())?;
    let atom = render_atom(view, &entries, name, &atom_path)?;
    Ok(vec![(rss_path, rss), (atom_path, atom)])
}

/// Feed items in listing order. The home page is never an item.
///
/// Fails when the root database has no publish-date column: a feed without
/// dates is meaningless.
pub fn feed_entries<'g>(
    view: &ViewEngine<'g>,
    tag: Option<FeedTag<'_>>,
    path: &str,
) -> Result<Vec<FeedEntry<'g>>, AppError> {
    let site = view.site();
    let graph = view.graph();
    let database = graph.database(&site.root_database_id).ok_or_else(|| {
        AppError::DanglingReference {
            id: site.root_database_id.to_string(),
        }
    })?;

    if !view.has_publish_date(database) {
        return Err(AppError::FeedGenerationFailed {
            path: path.to_string(),
            reason: format!(
                "database {} has no {:?} property",
                database.id, site.publish_date_property
            ),
        });
    }

    let options = tag
        .map(|tag| DbViewOptions::tagged(tag.id))
        .unwrap_or_default();
    let listing = view.pages_for_db(&database.id, &options)?;

    let entries = listing
        .pages
        .into_iter()
        .filter(|page| !page.id.is_index())
        .filter_map(|page| {
            let published = view.publish_date(page)?;
            let short = short_url(page, &site.short_url_property);
            Some(FeedEntry {
                page,
                title: graph.page_title(page),
                url: site.absolute_url(&SitePath::Page { short_url: &short }.relative()),
                published,
            })
        })
        .collect();
    Ok(entries)
}

fn feed_title(view: &ViewEngine<'_>, tag: Option<&TagName>) -> String {
    match tag {
        Some(tag) => format!("{} - {}", view.site().title, tag),
        None => view.site().title.clone(),
    }
}

fn feed_description(view: &ViewEngine<'_>) -> String {
    view.site()
        .description
        .clone()
        .unwrap_or_else(|| format!("Posts from {}", view.site().title))
}

pub fn render_rss(
    view: &ViewEngine<'_>,
    entries: &[FeedEntry<'_>],
    tag: Option<&TagName>,
    path: &str,
) -> Result<String, AppError> {
    let site = view.site();
    let items: Vec<rss::Item> = entries
        .iter()
        .map(|entry| {
            ItemBuilder::default()
                .title(entry.title.clone())
                .link(Some(entry.url.clone()))
                .guid(
                    GuidBuilder::default()
                        .permalink(true)
                        .value(entry.url.clone())
                        .build(),
                )
                .description(Some(format!("Read the full post at {}", entry.url)))
                .pub_date(entry.published.to_rfc2822())
                .author(site.author.clone())
                .build()
        })
        .collect();

    let channel = ChannelBuilder::default()
        .title(feed_title(view, tag))
        .link(site.site_url.clone())
        .description(feed_description(view))
        .language(Some(site.language.clone()))
        .generator(Some(env!("CARGO_PKG_NAME").to_string()))
        .items(items)
        .build();

    channel
        .validate()
        .map_err(|e| AppError::FeedGenerationFailed {
            path: path.to_string(),
            reason: format!("rss validation failed: {}", e),
        })?;
    Ok(channel.to_string())
}

pub fn render_atom(
    view: &ViewEngine<'_>,
    entries: &[FeedEntry<'_>],
    tag: Option<&TagName>,
    path: &SitePath<'_>,
) -> Result<String, AppError> {
    let site = view.site();
    let self_url = site.absolute_url(&path.relative());
    let home_url = site.absolute_url("");
    let updated = entries
        .iter()
        .map(|entry| entry.published)
        .max()
        .unwrap_or_else(|| Utc::now().fixed_offset());
    let author = site.author.as_deref().unwrap_or(&site.title);

    let mut writer = xml::document()?;
    xml::start(&mut writer, "feed", &[("xmlns", ATOM_NS)])?;
    xml::text_element(&mut writer, "id", &home_url)?;
    xml::text_element(&mut writer, "title", &feed_title(view, tag))?;
    xml::text_element(&mut writer, "subtitle", &feed_description(view))?;
    xml::text_element(&mut writer, "updated", &timestamp(&updated))?;
    write_link(&mut writer, "alternate", &home_url)?;
    write_link(&mut writer, "self", &self_url)?;
    write_author(&mut writer, author)?;
    xml::text_element(&mut writer, "generator", env!("CARGO_PKG_NAME"))?;

    for entry in entries {
        xml::start(&mut writer, "entry", &[])?;
        xml::text_element(&mut writer, "title", &entry.title)?;
        xml::text_element(&mut writer, "id", &entry.url)?;
        write_link(&mut writer, "alternate", &entry.url)?;
        xml::text_element(&mut writer, "published", &timestamp(&entry.published))?;
        xml::text_element(&mut writer, "updated", &timestamp(&entry.published))?;
        xml::text_element(
            &mut writer,
            "summary",
            &format!("Read the full post at {}", entry.url),
        )?;
        xml::end(&mut writer, "entry")?;
    }

    xml::end(&mut writer, "feed")?;
    xml::finish(writer, &path.relative())
}

fn write_link(writer: &mut XmlWriter, rel: &str, href: &str) -> Result<(), AppError> {
    xml::empty_element(writer, "link", &[("rel", rel), ("href", href)])
}

fn write_author(writer: &mut XmlWriter, name: &str) -> Result<(), AppError> {
    xml::start(writer, "author", &[])?;
    xml::text_element(writer, "name", name)?;
    xml::end(writer, "author")
}

fn timestamp(date: &DateTime<FixedOffset>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}
