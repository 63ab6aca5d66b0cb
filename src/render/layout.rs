// src/render/layout.rs
//! The page shell and the site header.

use super::html::{page_link, render_breadcrumbs};
use super::paths::{FeedKind, SitePath};
use crate::error::AppError;
use crate::types::NotionId;
use crate::view::ViewEngine;
use handlebars::{html_escape, Handlebars};
use serde_json::json;
use std::fmt::Write;

const PAGE_TEMPLATE_NAME: &str = "page";
const PAGE_TEMPLATE: &str = include_str!("../../templates/page.hbs");

/// Everything one HTML document needs besides the shared site settings.
#[derive(Debug, Clone, Default)]
pub struct PageShell {
    pub title: Option<String>,
    pub header: String,
    pub content: String,
}

/// Renders complete HTML documents from the embedded page template.
pub struct Layout {
    handlebars: Handlebars<'static>,
}

impl Layout {
    pub fn new() -> Result<Self, AppError> {
        let mut handlebars = Handlebars::new();
        handlebars
            .register_template_string(PAGE_TEMPLATE_NAME, PAGE_TEMPLATE)
            .map_err(|e| AppError::TemplateRenderError {
                name: PAGE_TEMPLATE_NAME.to_string(),
                message: e.to_string(),
            })?;
        Ok(Layout { handlebars })
    }

    pub fn render(&self, view: &ViewEngine<'_>, shell: &PageShell) -> Result<String, AppError> {
        let site = view.site();
        let data = json!({
            "language": site.language,
            "site_title": site.title,
            "title": shell.title,
            "description": site.description,
            "favicon": site.favicon_path,
            "analytics_domain": site.analytics_domain,
            "header": shell.header,
            "content": shell.content,
        });

        self.handlebars
            .render(PAGE_TEMPLATE_NAME, &data)
            .map_err(|e| AppError::TemplateRenderError {
                name: PAGE_TEMPLATE_NAME.to_string(),
                message: e.to_string(),
            })
    }
}

/// The site header: home link, tag pages, header pages, feed and newsletter
/// links, then the breadcrumbs of `node` when there is one.
pub fn render_header(view: &ViewEngine<'_>, node: Option<&NotionId>) -> Result<String, AppError> {
    let site = view.site();
    let graph = view.graph();
    let mut out = String::new();

    out.push_str(r#"<header class="header"><div class="header-row header-top">"#);
    write!(
        out,
        r#"<a class="home-link" href="/index.html">{}<span>{}</span></a>"#,
        site.favicon_path
            .as_ref()
            .map(|icon| format!(r#"<img src="{}" alt="" height="30">"#, html_escape(icon)))
            .unwrap_or_default(),
        html_escape(&site.home_name)
    )?;
    out.push_str(r#"<div class="header-divider"></div>"#);

    for tag in site.tags.values() {
        write!(
            out,
            r#"<div class="header-item header-section"><a href="{}">{}</a></div>"#,
            SitePath::Tag { tag }.href(),
            tag
        )?;
    }

    for id in &site.header_page_ids {
        match graph.page(id) {
            Some(page) => write!(
                out,
                r#"<div class="header-item header-section">{}</div>"#,
                page_link(view, page)
            )?,
            None => log::warn!("Header page {} is not loaded", id),
        }
    }

    out.push_str(r#"<div class="header-item">"#);
    for kind in FeedKind::ALL {
        write!(
            out,
            r#"<a href="{}">{}</a> "#,
            SitePath::Feed { kind, tag: None }.href(),
            kind.label()
        )?;
    }
    if site.newsletter_id.is_some() {
        write!(
            out,
            r#"<a href="{}">newsletter</a>"#,
            SitePath::Newsletter { tag: None }.href()
        )?;
    }
    out.push_str("</div></div>");

    out.push_str(r#"<div class="header-row">"#);
    if let Some(id) = node {
        out.push_str(&render_breadcrumbs(view, id)?);
    }
    out.push_str("</div></header>");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::graph::load_graph;
    use crate::model::{Database, NotionObject, Page, Parent};
    use crate::types::{PropertyKind, PropertyValue, RichText, TagName};

    const HOME: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
    const POSTS: &str = "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";
    const POST: &str = "cccccccccccccccccccccccccccccccc";

    fn graph() -> crate::graph::ContentGraph {
        let post = Page::new(POST, Parent::database(POSTS)).with_property(
            "Name",
            PropertyValue {
                id: "title".into(),
                value: PropertyKind::Title {
                    title: vec![RichText::plain("Hello <World>")],
                },
            },
        );
        load_graph(
            vec![
                NotionObject::Page(Page::new(HOME, Parent::Workspace)),
                NotionObject::Database(Database::new(POSTS, Parent::page(HOME)).with_title("Posts")),
                NotionObject::Page(post),
            ],
            &NotionId::new(HOME),
        )
        .unwrap()
    }

    #[test]
    fn header_lists_tags_feeds_and_breadcrumbs() {
        let graph = graph();
        let mut site = SiteConfig::new(HOME, POSTS, "https://example.com", "Site");
        site.tags.insert("t1".into(), TagName::new("rust").unwrap());
        site.newsletter_id = Some("someone".into());
        let view = ViewEngine::new(&graph, &site);

        let header = render_header(&view, Some(&NotionId::new(POST))).unwrap();
        assert!(header.contains(r#"<a href="/tag/rust.html">rust</a>"#));
        assert!(header.contains(r#"<a href="/rss.xml">rss</a>"#));
        assert!(header.contains(r#"<a href="/newsletter.html">newsletter</a>"#));
        assert!(header.contains("Posts</a></span> &gt; <span"));
        assert!(header.contains("Hello &lt;World&gt;"));
    }

    #[test]
    fn shell_fills_the_embedded_template() {
        let graph = graph();
        let mut site = SiteConfig::new(HOME, POSTS, "https://example.com", "Site");
        site.analytics_domain = Some("example.com".into());
        let view = ViewEngine::new(&graph, &site);

        let html = Layout::new()
            .unwrap()
            .render(
                &view,
                &PageShell {
                    title: Some("A & B".into()),
                    header: "<header></header>".into(),
                    content: "<p>body</p>".into(),
                },
            )
            .unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>A &amp; B | Site</title>"));
        assert!(html.contains("<p>body</p>"));
        assert!(html.contains(r#"data-domain="example.com""#));
        assert!(!html.contains(r#"rel="icon""#));
    }
}
