// src/render/mod.rs
//! Turns a loaded content graph into the files of the static site.
//!
//! Rendering is pure: [`render_site`] returns an [`OutputPlan`] and the
//! output module performs the writes. Pages are rendered one after another
//! with a single heading-slug registry for the whole run.

mod feed;
mod html;
mod layout;
mod pages;
mod paths;
mod sitemap;
mod xml;

pub use feed::{feed_entries, render_feeds, FeedEntry, FeedTag};
pub use html::{render_rich_text, youtube_id, BlockRenderer, HeadingAnchor};
pub use layout::{render_header, Layout, PageShell};
pub use paths::{FeedKind, SitePath};
pub use sitemap::{render_sitemap, sitemap_entries, SitemapEntry};

use crate::config::SiteConfig;
use crate::constants::ASSET_DIR_NAME;
use crate::error::AppError;
use crate::graph::ContentGraph;
use crate::model::{Database, Page};
use crate::output::{DeliveryTarget, OutputPlan};
use crate::types::NotionId;
use crate::view::{short_url, HeadingSlugger, ViewEngine};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Renders the whole site. `asset_dir` is the cache's image directory, if
/// any images were downloaded.
pub fn render_site(
    graph: &ContentGraph,
    site: &SiteConfig,
    asset_dir: Option<&Path>,
) -> Result<OutputPlan, AppError> {
    SiteRenderer::new(graph, site)?.render(asset_dir)
}

/// Renders every artifact of the site into one plan.
pub struct SiteRenderer<'g> {
    view: ViewEngine<'g>,
    layout: Layout,
    slugger: HeadingSlugger,
    plan: OutputPlan,
    written: HashSet<PathBuf>,
}

impl<'g> SiteRenderer<'g> {
    pub fn new(graph: &'g ContentGraph, site: &'g SiteConfig) -> Result<Self, AppError> {
        Ok(SiteRenderer {
            view: ViewEngine::new(graph, site),
            layout: Layout::new()?,
            slugger: HeadingSlugger::new(),
            plan: OutputPlan::new(),
            written: HashSet::new(),
        })
    }

    pub fn render(mut self, asset_dir: Option<&Path>) -> Result<OutputPlan, AppError> {
        let graph = self.view.graph();
        let site = self.view.site();
        log::info!(
            "Rendering {} pages and {} databases",
            graph.pages().count(),
            graph.databases().count()
        );

        for page in graph.pages() {
            self.render_page(page)?;
        }
        for database in graph.databases() {
            self.render_database(database)?;
        }

        let root_database = graph.database(&site.root_database_id);
        for (tag_id, tag) in &site.tags {
            match root_database {
                Some(database) => {
                    let body = pages::tag_body(&self.view, database, tag_id, tag)?;
                    self.emit_html(SitePath::Tag { tag }, Some(tag.to_string()), Some(&database.id), body)?;
                }
                None => log::warn!("No tag page for {}: root database is not loaded", tag),
            }
            let feeds = render_feeds(&self.view, Some(FeedTag { id: tag_id, name: tag }))?;
            for (path, content) in feeds {
                self.emit(&path, content);
            }
        }

        for (path, content) in render_feeds(&self.view, None)? {
            self.emit(&path, content);
        }

        if let Some(newsletter_id) = &site.newsletter_id {
            let body = pages::newsletter_body(&self.view, newsletter_id, None)?;
            self.emit_html(SitePath::Newsletter { tag: None }, Some("newsletter".into()), None, body)?;
            for tag in site.tags.values() {
                let body = pages::newsletter_body(&self.view, newsletter_id, Some(tag))?;
                self.emit_html(
                    SitePath::Newsletter { tag: Some(tag) },
                    Some(format!("{} newsletter", tag)),
                    None,
                    body,
                )?;
            }
        }

        let sitemap = render_sitemap(&self.view)?;
        self.emit(&SitePath::Sitemap, sitemap);

        if let Some(dir) = asset_dir {
            self.plan.push(DeliveryTarget::CopyDirectory {
                from: dir.to_path_buf(),
                to: PathBuf::from(ASSET_DIR_NAME),
            });
        }

        log::info!("Rendered {} output operations", self.plan.len());
        Ok(self.plan)
    }

    fn render_page(&mut self, page: &Page) -> Result<(), AppError> {
        let site = self.view.site();
        let short = short_url(page, &site.short_url_property);
        let title = self.view.graph().page_title(page);
        log::debug!("Rendering page {} as {}.html", page.id, short);

        let body = pages::page_body(&self.view, page, &mut self.slugger)?;
        self.emit_html(SitePath::Page { short_url: &short }, Some(title.clone()), Some(&page.id), body)?;

        if short != page.id.as_str() && !page.id.is_index() {
            let body = pages::redirect_body(&self.view, page);
            self.emit_html(SitePath::Redirect { id: &page.id }, Some(title), None, body)?;
        }
        Ok(())
    }

    fn render_database(&mut self, database: &Database) -> Result<(), AppError> {
        let body = pages::database_body(&self.view, database)?;
        let title = self.view.graph().database_title(database);
        self.emit_html(SitePath::Database { id: &database.id }, Some(title), Some(&database.id), body)
    }

    /// Wraps a body in the header and page shell and plans the write.
    fn emit_html(
        &mut self,
        path: SitePath<'_>,
        title: Option<String>,
        breadcrumbs_for: Option<&NotionId>,
        content: String,
    ) -> Result<(), AppError> {
        let header = render_header(&self.view, breadcrumbs_for)?;
        let html = self.layout.render(
            &self.view,
            &PageShell {
                title,
                header,
                content,
            },
        )?;
        self.emit(&path, html);
        Ok(())
    }

    fn emit(&mut self, path: &SitePath<'_>, content: String) {
        let path = path.to_path_buf();
        if !self.written.insert(path.clone()) {
            log::warn!("{} is generated twice; the later one wins", path.display());
        }
        self.plan.write_file(path, content);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::load_graph;
    use crate::model::{NotionObject, Parent};
    use crate::types::{
        DatabaseProperty, DateValue, PropertyKind, PropertyValue, RichText, SchemaKind, TagName,
    };

    const HOME: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
    const POSTS: &str = "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";
    const POST: &str = "cccccccccccccccccccccccccccccccc";

    fn graph() -> ContentGraph {
        let posts = Database::new(POSTS, Parent::page(HOME))
            .with_title("Posts")
            .with_property(DatabaseProperty {
                id: "pd".into(),
                name: "Publish Date".into(),
                kind: SchemaKind::Date,
            });
        let post = Page::new(POST, Parent::database(POSTS))
            .with_property(
                "Name",
                PropertyValue {
                    id: "title".into(),
                    value: PropertyKind::Title {
                        title: vec![RichText::plain("First Post")],
                    },
                },
            )
            .with_property(
                "Publish Date",
                PropertyValue {
                    id: "pd".into(),
                    value: PropertyKind::Date {
                        date: Some(DateValue::new("2024-05-01")),
                    },
                },
            );
        load_graph(
            vec![
                NotionObject::Page(Page::new(HOME, Parent::Workspace)),
                NotionObject::Database(posts),
                NotionObject::Page(post),
            ],
            &NotionId::new(HOME),
        )
        .unwrap()
    }

    #[test]
    fn plan_covers_every_artifact() {
        let graph = graph();
        let mut site = SiteConfig::new(HOME, POSTS, "https://example.com", "Site");
        site.tags.insert("t1".into(), TagName::new("rust").unwrap());
        site.newsletter_id = Some("someone".into());

        let plan = render_site(&graph, &site, Some(Path::new("/tmp/cache/images"))).unwrap();
        let mut paths: Vec<String> = plan
            .written_paths()
            .map(|path| path.display().to_string())
            .collect();
        paths.sort();

        let expected = [
            "atom.xml",
            "cccccccc-cccc-cccc-cccc-cccccccccccc.html",
            "db/bbbbbbbb-bbbb-bbbb-bbbb-bbbbbbbbbbbb.html",
            "firstpost.html",
            "index.html",
            "newsletter.html",
            "rss.xml",
            "sitemap.xml",
            "tag/rust.html",
            "tag/rust/atom.xml",
            "tag/rust/newsletter.html",
            "tag/rust/rss.xml",
        ];
        assert_eq!(paths, expected);
        assert!(plan
            .operations
            .iter()
            .any(|op| matches!(op, DeliveryTarget::CopyDirectory { to, .. } if to == Path::new("images"))));

        let post = plan.content_of("firstpost.html").unwrap();
        assert!(post.contains("<title>First Post | Site</title>"));
        assert!(post.contains("May 1, 2024"));
        let redirect = plan
            .content_of("cccccccc-cccc-cccc-cccc-cccccccccccc.html")
            .unwrap();
        assert!(redirect.contains("Page has moved"));
        assert!(redirect.contains(r#"href="/firstpost.html""#));
    }

    #[test]
    fn without_newsletter_or_assets_those_artifacts_are_absent() {
        let graph = graph();
        let site = SiteConfig::new(HOME, POSTS, "https://example.com", "Site");

        let plan = render_site(&graph, &site, None).unwrap();
        assert!(plan.content_of("newsletter.html").is_none());
        assert!(!plan
            .operations
            .iter()
            .any(|op| matches!(op, DeliveryTarget::CopyDirectory { .. })));
    }
}
