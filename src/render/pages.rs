// src/render/pages.rs
//! Bodies of the generated HTML documents. The header and the page shell
//! are added by [`super::SiteRenderer`].

use super::html::{page_link, render_listing, render_rich_text, BlockRenderer};
use super::paths::{FeedKind, SitePath};
use crate::constants::UNTITLED_PAGE;
use crate::error::AppError;
use crate::model::{Database, Page};
use crate::types::TagName;
use crate::view::{DbViewOptions, HeadingSlugger, ViewEngine};
use handlebars::html_escape;
use std::fmt::Write;

const BUTTONDOWN_EMBED: &str = "https://buttondown.email/api/emails/embed-subscribe";

/// Title, publish date, blocks and post navigation of one page.
pub fn page_body(
    view: &ViewEngine<'_>,
    page: &Page,
    slugger: &mut HeadingSlugger,
) -> Result<String, AppError> {
    let mut out = String::new();

    let title = match page.title_property().filter(|title| !title.is_empty()) {
        Some(title) => render_rich_text(view, title),
        None => {
            log::warn!("Page {} has no title", page.id);
            UNTITLED_PAGE.to_string()
        }
    };
    write!(out, r#"<h1 class="page-title">{}</h1>"#, title)?;

    if let Some(date) = view.publish_date(page) {
        write!(
            out,
            r#"<div class="publish-date">{}</div>"#,
            date.format("%B %-d, %Y")
        )?;
    }

    let blocks = BlockRenderer::new(view, page, slugger);
    write!(
        out,
        r#"<article class="page-body">{}</article>"#,
        blocks.render(&page.children)?
    )?;

    out.push_str(&post_navigation(view, page)?);
    Ok(out)
}

/// Links to the older and newer neighbours of a post in the root database.
/// Empty for pages outside it.
pub fn post_navigation(view: &ViewEngine<'_>, page: &Page) -> Result<String, AppError> {
    let root_database = &view.site().root_database_id;
    if view.graph().database(root_database).is_none() {
        log::debug!("Root database {} is not loaded; no post navigation", root_database);
        return Ok(String::new());
    }

    let adjacent = view.adjacent_posts(&page.id, root_database)?;
    if adjacent.previous.is_none() && adjacent.next.is_none() {
        return Ok(String::new());
    }

    let mut out = String::from(r#"<div class="post-navigation">"#);
    if let Some(previous) = adjacent.previous {
        write!(
            out,
            r#"<div class="post-previous">← Previous: {}</div>"#,
            page_link(view, previous)
        )?;
    }
    if let Some(next) = adjacent.next {
        write!(
            out,
            r#"<div class="post-next">Next →: {}</div>"#,
            page_link(view, next)
        )?;
    }
    out.push_str("</div>");
    Ok(out)
}

/// The body left at a page's old id-based path.
pub fn redirect_body(view: &ViewEngine<'_>, page: &Page) -> String {
    format!(
        r#"<h1>Page has moved</h1><p>This page now lives at {}.</p>"#,
        page_link(view, page)
    )
}

pub fn database_body(view: &ViewEngine<'_>, database: &Database) -> Result<String, AppError> {
    render_listing(view, database, &DbViewOptions::default())
}

/// Posts of the root database carrying one tag, with subscription links.
pub fn tag_body(
    view: &ViewEngine<'_>,
    database: &Database,
    tag_id: &str,
    tag: &TagName,
) -> Result<String, AppError> {
    let mut out = String::new();
    write!(out, r#"<h1 class="page-title">{}</h1>"#, tag)?;

    out.push_str(r#"<div class="subscribe">Follow posts tagged "#);
    write!(out, "<strong>{}</strong>: ", tag)?;
    if view.site().newsletter_id.is_some() {
        write!(
            out,
            r#"<a href="{}">newsletter</a> "#,
            SitePath::Newsletter { tag: Some(tag) }.href()
        )?;
    }
    for kind in FeedKind::ALL {
        write!(
            out,
            r#"<a href="{}">{}</a> "#,
            SitePath::Feed {
                kind,
                tag: Some(tag)
            }
            .href(),
            kind.label()
        )?;
    }
    out.push_str("</div>");

    out.push_str(&render_listing(view, database, &DbViewOptions::tagged(tag_id))?);
    Ok(out)
}

/// A Buttondown subscribe form, narrowed to one tag when given.
pub fn newsletter_body(
    view: &ViewEngine<'_>,
    newsletter_id: &str,
    tag: Option<&TagName>,
) -> Result<String, AppError> {
    let mut out = String::new();
    match tag {
        Some(tag) => write!(
            out,
            r#"<h1 class="page-title">Get emails when I write new posts tagged "{}"</h1>"#,
            tag
        )?,
        None => write!(
            out,
            r#"<h1 class="page-title">Get emails when I write new posts on {}</h1>"#,
            html_escape(&view.site().title)
        )?,
    }

    write!(
        out,
        r#"<form class="newsletter-form" action="{}/{}" method="post" target="popupwindow">"#,
        BUTTONDOWN_EMBED,
        html_escape(newsletter_id)
    )?;
    out.push_str(r#"<label for="bd-email">Enter your email</label>"#);
    out.push_str(r#"<input type="email" name="email" id="bd-email" required>"#);
    if let Some(tag) = tag {
        write!(out, r#"<input type="hidden" name="tag" value="{}">"#, tag)?;
    }
    out.push_str(r#"<input type="submit" value="Subscribe"></form>"#);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::graph::{load_graph, ContentGraph};
    use crate::model::{NotionObject, Parent};
    use crate::types::{
        DatabaseProperty, DateValue, NotionId, PropertyKind, PropertyValue, RichText, SchemaKind,
    };

    const HOME: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
    const POSTS: &str = "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";
    const OLD: &str = "11111111111111111111111111111111";
    const MID: &str = "22222222222222222222222222222222";
    const NEW: &str = "33333333333333333333333333333333";

    fn post(id: &str, title: &str, date: &str) -> NotionObject {
        NotionObject::Page(
            Page::new(id, Parent::database(POSTS))
                .with_property(
                    "Name",
                    PropertyValue {
                        id: "title".into(),
                        value: PropertyKind::Title {
                            title: vec![RichText::plain(title)],
                        },
                    },
                )
                .with_property(
                    "Publish Date",
                    PropertyValue {
                        id: "pd".into(),
                        value: PropertyKind::Date {
                            date: Some(DateValue::new(date)),
                        },
                    },
                ),
        )
    }

    fn graph() -> ContentGraph {
        let posts = Database::new(POSTS, Parent::page(HOME))
            .with_title("Posts")
            .with_property(DatabaseProperty {
                id: "pd".into(),
                name: "Publish Date".into(),
                kind: SchemaKind::Date,
            });
        load_graph(
            vec![
                NotionObject::Page(Page::new(HOME, Parent::Workspace)),
                NotionObject::Database(posts),
                post(OLD, "Old", "2024-01-01"),
                post(MID, "Mid", "2024-02-01"),
                post(NEW, "New", "2024-03-01"),
            ],
            &NotionId::new(HOME),
        )
        .unwrap()
    }

    #[test]
    fn page_body_has_title_date_and_navigation() {
        let graph = graph();
        let site = SiteConfig::new(HOME, POSTS, "https://example.com", "Site");
        let view = ViewEngine::new(&graph, &site);
        let page = graph.page(&NotionId::new(MID)).unwrap();

        let body = page_body(&view, page, &mut HeadingSlugger::new()).unwrap();
        assert!(body.contains(r#"<h1 class="page-title">Mid</h1>"#));
        assert!(body.contains("February 1, 2024"));
        assert!(body.contains(r#"← Previous: <a class="page-link" href="/old.html">Old</a>"#));
        assert!(body.contains(r#"Next →: <a class="page-link" href="/new.html">New</a>"#));
    }

    #[test]
    fn newest_post_has_no_next_link_and_home_has_no_navigation() {
        let graph = graph();
        let site = SiteConfig::new(HOME, POSTS, "https://example.com", "Site");
        let view = ViewEngine::new(&graph, &site);

        let newest = graph.page(&NotionId::new(NEW)).unwrap();
        let nav = post_navigation(&view, newest).unwrap();
        assert!(nav.contains("Previous"));
        assert!(!nav.contains("Next"));

        let home = graph.root_page().unwrap();
        assert_eq!(post_navigation(&view, home).unwrap(), "");
        let body = page_body(&view, home, &mut HeadingSlugger::new()).unwrap();
        assert!(body.contains(UNTITLED_PAGE));
    }

    #[test]
    fn tagged_newsletter_form_carries_the_tag() {
        let graph = graph();
        let site = SiteConfig::new(HOME, POSTS, "https://example.com", "Site");
        let view = ViewEngine::new(&graph, &site);
        let tag = TagName::new("rust").unwrap();

        let body = newsletter_body(&view, "someone", Some(&tag)).unwrap();
        assert!(body.contains("https://buttondown.email/api/emails/embed-subscribe/someone"));
        assert!(body.contains(r#"<input type="hidden" name="tag" value="rust">"#));
    }
}
