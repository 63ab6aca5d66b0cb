// src/render/html.rs
//! Block trees and rich text to HTML.
//!
//! Content problems never fail a render. A block the site cannot show turns
//! into a visible `<type> not implemented` marker and a warning in the log,
//! and a mention of a page that was never fetched falls back to its text.

use super::paths::SitePath;
use crate::error::AppError;
use crate::graph::{breadcrumbs, BreadcrumbKind};
use crate::model::{Block, BlockContent, Database, FileBlock, FileSource, Icon, LinkTarget, Page};
use crate::types::{plain_text, Annotations, Color, Mention, NotionId, RichText, RichTextContent};
use crate::view::{short_url, DbViewOptions, HeadingSlugger, ViewEngine};
use handlebars::html_escape;
use indexmap::IndexMap;
use std::fmt::Write;

/// A heading's place in the table of contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingAnchor {
    pub level: u8,
    pub text: String,
    pub slug: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Bulleted,
    Numbered,
}

impl ListKind {
    fn of(block: &Block) -> Option<Self> {
        match block.content {
            BlockContent::BulletedListItem { .. } => Some(ListKind::Bulleted),
            BlockContent::NumberedListItem { .. } => Some(ListKind::Numbered),
            _ => None,
        }
    }

    fn tag(self) -> &'static str {
        match self {
            ListKind::Bulleted => "ul",
            ListKind::Numbered => "ol",
        }
    }
}

// --- Links ---

/// Root-relative URL of a page.
pub fn page_href(view: &ViewEngine<'_>, page: &Page) -> String {
    let short = short_url(page, &view.site().short_url_property);
    SitePath::Page { short_url: &short }.href()
}

pub fn database_href(database: &Database) -> String {
    SitePath::Database { id: &database.id }.href()
}

pub fn page_link(view: &ViewEngine<'_>, page: &Page) -> String {
    format!(
        r#"<a class="page-link" href="{}">{}</a>"#,
        html_escape(&page_href(view, page)),
        html_escape(&view.graph().page_title(page))
    )
}

pub fn database_link(view: &ViewEngine<'_>, database: &Database) -> String {
    format!(
        r#"<a class="page-link" href="{}">{}</a>"#,
        html_escape(&database_href(database)),
        html_escape(&view.graph().database_title(database))
    )
}

/// The breadcrumb trail of a page or database, links joined by `>`.
pub fn render_breadcrumbs(view: &ViewEngine<'_>, id: &NotionId) -> Result<String, AppError> {
    let graph = view.graph();
    let links: Vec<String> = breadcrumbs(graph, id)?
        .into_iter()
        .map(|crumb| match crumb.kind {
            BreadcrumbKind::Page => graph
                .page(&crumb.id)
                .map(|page| page_link(view, page))
                .unwrap_or_else(|| html_escape(&crumb.title)),
            BreadcrumbKind::Database => graph
                .database(&crumb.id)
                .map(|database| database_link(view, database))
                .unwrap_or_else(|| html_escape(&crumb.title)),
        })
        .map(|link| format!(r#"<span class="breadcrumb">{}</span>"#, link))
        .collect();
    Ok(links.join(" &gt; "))
}

// --- Rich text ---

/// Renders a run of rich text segments.
pub fn render_rich_text(view: &ViewEngine<'_>, items: &[RichText]) -> String {
    items
        .iter()
        .map(|item| render_segment(view, item))
        .collect()
}

fn render_segment(view: &ViewEngine<'_>, item: &RichText) -> String {
    let graph = view.graph();
    let (content, href) = match &item.content {
        RichTextContent::Text { text } => (
            html_escape(&text.content),
            text.link.as_ref().map(|link| link.url.clone()),
        ),
        RichTextContent::Equation { equation } => (
            format!(
                r#"<span class="equation">{}</span>"#,
                html_escape(&equation.expression)
            ),
            None,
        ),
        RichTextContent::Mention { mention } => match mention {
            Mention::Page { page } => match graph.page(&page.id) {
                Some(target) => (
                    html_escape(&graph.page_title(target)),
                    Some(page_href(view, target)),
                ),
                None => {
                    log::warn!("Mention of page {} which is not loaded", page.id);
                    (html_escape(&item.plain_text), None)
                }
            },
            Mention::Database { database } => match graph.database(&database.id) {
                Some(target) => (
                    html_escape(&graph.database_title(target)),
                    Some(database_href(target)),
                ),
                None => {
                    log::warn!("Mention of database {} which is not loaded", database.id);
                    (html_escape(&item.plain_text), None)
                }
            },
            Mention::LinkPreview { link_preview } => {
                (html_escape(&item.plain_text), Some(link_preview.url.clone()))
            }
            Mention::Date { .. } | Mention::Other => (html_escape(&item.plain_text), None),
        },
    };

    let styled = apply_annotations(content, &item.annotations);
    let is_mention = matches!(item.content, RichTextContent::Mention { .. });
    match href {
        Some(href) if is_mention => format!(
            r#"<a class="mention" href="{}">{}</a>"#,
            html_escape(&href),
            styled
        ),
        Some(href) => format!(r#"<a href="{}">{}</a>"#, html_escape(&href), styled),
        None => styled,
    }
}

fn apply_annotations(mut content: String, annotations: &Annotations) -> String {
    if annotations.code {
        content = format!("<code>{}</code>", content);
    }
    if annotations.bold {
        content = format!("<strong>{}</strong>", content);
    }
    if annotations.italic {
        content = format!("<em>{}</em>", content);
    }
    if annotations.strikethrough {
        content = format!("<s>{}</s>", content);
    }
    if annotations.underline {
        content = format!("<u>{}</u>", content);
    }
    if annotations.color != Color::Default {
        content = format!(
            r#"<span class="{}">{}</span>"#,
            annotations.color.css_class(),
            content
        );
    }
    content
}

fn color_class(base: &str, color: Color) -> String {
    if color == Color::Default {
        base.to_string()
    } else {
        format!("{} {}", base, color.css_class())
    }
}

// --- Database listings ---

/// Member pages of a database in listing order, each with its tags.
pub fn render_listing(
    view: &ViewEngine<'_>,
    database: &Database,
    options: &DbViewOptions,
) -> Result<String, AppError> {
    let listing = view.pages_for_db(&database.id, options)?;

    let mut out = String::new();
    write!(
        out,
        r#"<div class="db"><div class="db-title">{}</div><div class="db-rows">"#,
        database_link(view, database)
    )?;
    for page in listing.pages {
        write!(out, r#"<div class="db-row">{}"#, page_link(view, page))?;
        if let Some(date) = view.publish_date(page) {
            write!(
                out,
                r#"<span class="db-date">{}</span>"#,
                date.format("%Y-%m-%d")
            )?;
        }
        out.push_str(&render_tags(view, page));
        out.push_str("</div>");
    }
    out.push_str("</div></div>");
    Ok(out)
}

/// Tag pills. Tags with a public name link to their tag page.
pub fn render_tags(view: &ViewEngine<'_>, page: &Page) -> String {
    view.page_tags(page)
        .into_iter()
        .map(|tag| {
            let style = format!("background: {}", tag.option.color.tag_background());
            match tag.public_name {
                Some(name) => format!(
                    r#"<a class="tag" style="{}" href="{}">{}</a>"#,
                    style,
                    SitePath::Tag { tag: name }.href(),
                    html_escape(&tag.option.name)
                ),
                None => format!(
                    r#"<span class="tag" style="{}">{}</span>"#,
                    style,
                    html_escape(&tag.option.name)
                ),
            }
        })
        .collect()
}

// --- Blocks ---

/// Renders one page's block tree.
///
/// Heading anchors are assigned when the renderer is built, in document
/// order, so the table of contents and the headings always agree.
pub struct BlockRenderer<'v, 'g> {
    view: &'v ViewEngine<'g>,
    page_id: &'v NotionId,
    headings: IndexMap<NotionId, HeadingAnchor>,
}

impl<'v, 'g> BlockRenderer<'v, 'g> {
    pub fn new(view: &'v ViewEngine<'g>, page: &'v Page, slugger: &mut HeadingSlugger) -> Self {
        let mut headings = IndexMap::new();
        collect_headings(&page.children, slugger, &mut headings);
        BlockRenderer {
            view,
            page_id: &page.id,
            headings,
        }
    }

    pub fn headings(&self) -> impl Iterator<Item = &HeadingAnchor> {
        self.headings.values()
    }

    pub fn render(&self, blocks: &[Block]) -> Result<String, AppError> {
        let mut out = String::new();
        self.render_blocks(blocks, &mut out)?;
        Ok(out)
    }

    /// Renders siblings, grouping consecutive list items into one list.
    fn render_blocks(&self, blocks: &[Block], out: &mut String) -> Result<(), AppError> {
        let mut open: Option<ListKind> = None;
        for block in blocks {
            let kind = ListKind::of(block);
            if kind != open {
                if let Some(list) = open {
                    write!(out, "</{}>", list.tag())?;
                }
                if let Some(list) = kind {
                    write!(out, "<{}>", list.tag())?;
                }
                open = kind;
            }
            self.render_block(block, out)?;
        }
        if let Some(list) = open {
            write!(out, "</{}>", list.tag())?;
        }
        Ok(())
    }

    fn rich(&self, items: &[RichText]) -> String {
        render_rich_text(self.view, items)
    }

    fn render_block(&self, block: &Block, out: &mut String) -> Result<(), AppError> {
        match &block.content {
            BlockContent::Paragraph { paragraph } => {
                write!(
                    out,
                    r#"<p class="{}">{}</p>"#,
                    color_class("paragraph", paragraph.color),
                    self.rich(&paragraph.rich_text)
                )?;
                self.render_nested(block, out)?;
            }
            BlockContent::Heading1 { heading_1: heading }
            | BlockContent::Heading2 { heading_2: heading }
            | BlockContent::Heading3 { heading_3: heading } => {
                let level = block.heading_level().unwrap_or(1);
                let slug = self
                    .headings
                    .get(&block.id)
                    .map(|anchor| anchor.slug.clone())
                    .unwrap_or_default();
                let markup = format!(
                    r##"<h{level} id="{slug}" class="{class}"><a href="#{slug}">{text}</a></h{level}>"##,
                    level = level,
                    slug = html_escape(&slug),
                    class = color_class("heading", heading.color),
                    text = self.rich(&heading.rich_text)
                );
                if heading.is_toggleable && !block.children.is_empty() {
                    write!(out, "<details><summary>{}</summary>", markup)?;
                    self.render_blocks(&block.children, out)?;
                    out.push_str("</details>");
                } else {
                    out.push_str(&markup);
                }
            }
            BlockContent::BulletedListItem {
                bulleted_list_item: item,
            }
            | BlockContent::NumberedListItem {
                numbered_list_item: item,
            } => {
                write!(out, "<li>{}", self.rich(&item.rich_text))?;
                self.render_blocks(&block.children, out)?;
                out.push_str("</li>");
            }
            BlockContent::ToDo { to_do } => {
                write!(
                    out,
                    r#"<div class="to-do"><input type="checkbox" disabled{}> <span>{}</span></div>"#,
                    if to_do.checked { " checked" } else { "" },
                    self.rich(&to_do.rich_text)
                )?;
                self.render_nested(block, out)?;
            }
            BlockContent::Toggle { toggle } => {
                write!(
                    out,
                    r#"<details class="{}"><summary>{}</summary>"#,
                    color_class("toggle", toggle.color),
                    self.rich(&toggle.rich_text)
                )?;
                self.render_blocks(&block.children, out)?;
                out.push_str("</details>");
            }
            BlockContent::Quote { quote } => {
                write!(
                    out,
                    r#"<blockquote class="{}">{}"#,
                    color_class("quote", quote.color),
                    self.rich(&quote.rich_text)
                )?;
                self.render_blocks(&block.children, out)?;
                out.push_str("</blockquote>");
            }
            BlockContent::Callout { callout } => {
                write!(out, r#"<div class="{}">"#, color_class("callout", callout.color))?;
                if let Some(Icon::Emoji { emoji }) = &callout.icon {
                    write!(out, r#"<span class="callout-icon">{}</span>"#, html_escape(emoji))?;
                }
                write!(out, "<div>{}", self.rich(&callout.rich_text))?;
                self.render_blocks(&block.children, out)?;
                out.push_str("</div></div>");
            }
            BlockContent::Code { code } => {
                write!(
                    out,
                    r#"<pre class="code"><code class="language-{}">{}</code></pre>"#,
                    html_escape(&code.language),
                    html_escape(&plain_text(&code.rich_text))
                )?;
                self.render_caption(&code.caption, out);
            }
            BlockContent::Equation { equation } => {
                write!(
                    out,
                    r#"<div class="equation">{}</div>"#,
                    html_escape(&equation.expression)
                )?;
            }
            BlockContent::Divider => out.push_str(r#"<hr class="divider">"#),
            BlockContent::Breadcrumb => {
                write!(
                    out,
                    r#"<nav class="breadcrumbs">{}</nav>"#,
                    render_breadcrumbs(self.view, self.page_id)?
                )?;
            }
            BlockContent::TableOfContents => self.render_table_of_contents(out)?,
            BlockContent::Image { image } => self.render_image(block, image, out)?,
            BlockContent::Video { video } => match &video.source {
                FileSource::External { external } => {
                    out.push_str(r#"<div class="video">"#);
                    match youtube_id(&external.url) {
                        Some(video_id) => write!(
                            out,
                            r#"<div class="embed-container"><iframe width="100%" height="100%" src="https://www.youtube.com/embed/{}" title="YouTube video player" allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture; web-share" allowfullscreen frameborder="0"></iframe></div>"#,
                            html_escape(&video_id)
                        )?,
                        None => write!(
                            out,
                            r#"<a href="{0}">{0}</a>"#,
                            html_escape(&external.url)
                        )?,
                    }
                    self.render_caption(&video.caption, out);
                    out.push_str("</div>");
                }
                FileSource::File { .. } => self.not_implemented(block, out),
            },
            BlockContent::Bookmark { bookmark: link } | BlockContent::LinkPreview { link_preview: link } => {
                write!(
                    out,
                    r#"<div class="bookmark"><a href="{0}">{0}</a>"#,
                    html_escape(&link.url)
                )?;
                self.render_caption(&link.caption, out);
                out.push_str("</div>");
            }
            BlockContent::Embed { embed } => {
                let src = youtube_id(&embed.url)
                    .map(|video_id| format!("https://www.youtube.com/embed/{}", video_id))
                    .unwrap_or_else(|| embed.url.clone());
                write!(
                    out,
                    r#"<div class="embed"><div class="embed-container"><iframe width="100%" height="100%" src="{}" frameborder="0" allowfullscreen></iframe></div>"#,
                    html_escape(&src)
                )?;
                self.render_caption(&embed.caption, out);
                out.push_str("</div>");
            }
            BlockContent::ChildPage { child_page } => match self.view.graph().page(&block.id) {
                Some(page) => write!(
                    out,
                    r#"<div class="child-page">{}</div>"#,
                    page_link(self.view, page)
                )?,
                None => {
                    log::warn!("Unable to find page with id {}", block.id);
                    write!(
                        out,
                        r#"<div class="child-page">{}</div>"#,
                        html_escape(&child_page.title)
                    )?;
                }
            },
            BlockContent::ChildDatabase { child_database } => {
                match self.view.graph().database(&block.id) {
                    Some(database) => out.push_str(&render_listing(
                        self.view,
                        database,
                        &DbViewOptions::default(),
                    )?),
                    None => {
                        log::warn!("Unable to find database with id {}", block.id);
                        write!(
                            out,
                            r#"<div class="db">{}</div>"#,
                            html_escape(&child_database.title)
                        )?;
                    }
                }
            }
            BlockContent::LinkToPage { link_to_page } => {
                let graph = self.view.graph();
                let link = match link_to_page {
                    LinkTarget::PageId { page_id } => {
                        graph.page(page_id).map(|page| page_link(self.view, page))
                    }
                    LinkTarget::DatabaseId { database_id } => graph
                        .database(database_id)
                        .map(|database| database_link(self.view, database)),
                    LinkTarget::Other => None,
                };
                match link {
                    Some(link) => write!(out, r#"<div class="link-to-page">{}</div>"#, link)?,
                    None => {
                        log::warn!("Block {} links to a node that is not loaded", block.id);
                        self.not_implemented(block, out);
                    }
                }
            }
            BlockContent::Table { table } => {
                out.push_str(r#"<table class="table"><tbody>"#);
                for (row_index, row) in block.children.iter().enumerate() {
                    let BlockContent::TableRow { table_row } = &row.content else {
                        self.not_implemented(row, out);
                        continue;
                    };
                    out.push_str("<tr>");
                    for (column_index, cell) in table_row.cells.iter().enumerate() {
                        let header = (table.has_column_header && row_index == 0)
                            || (table.has_row_header && column_index == 0);
                        let tag = if header { "th" } else { "td" };
                        write!(out, "<{0}>{1}</{0}>", tag, self.rich(cell))?;
                    }
                    out.push_str("</tr>");
                }
                out.push_str("</tbody></table>");
            }
            BlockContent::ColumnList => {
                out.push_str(r#"<div class="column-list">"#);
                self.render_blocks(&block.children, out)?;
                out.push_str("</div>");
            }
            BlockContent::Column => {
                out.push_str(r#"<div class="column">"#);
                self.render_blocks(&block.children, out)?;
                out.push_str("</div>");
            }
            BlockContent::Synced { .. } => {
                out.push_str(r#"<div class="synced">"#);
                self.render_blocks(&block.children, out)?;
                out.push_str("</div>");
            }
            BlockContent::TableRow { .. }
            | BlockContent::File { .. }
            | BlockContent::Pdf { .. }
            | BlockContent::Audio { .. }
            | BlockContent::Template { .. }
            | BlockContent::Unsupported => self.not_implemented(block, out),
        }
        Ok(())
    }

    /// Children of blocks that Notion indents under their parent.
    fn render_nested(&self, block: &Block, out: &mut String) -> Result<(), AppError> {
        if block.children.is_empty() {
            return Ok(());
        }
        out.push_str(r#"<div class="nested">"#);
        self.render_blocks(&block.children, out)?;
        out.push_str("</div>");
        Ok(())
    }

    fn render_caption(&self, caption: &[RichText], out: &mut String) {
        if !caption.is_empty() {
            out.push_str(r#"<div class="caption">"#);
            out.push_str(&self.rich(caption));
            out.push_str("</div>");
        }
    }

    fn render_image(&self, block: &Block, image: &FileBlock, out: &mut String) -> Result<(), AppError> {
        if let FileSource::File { .. } = image.source {
            log::warn!(
                "Image block {} still points at a Notion-hosted URL; the link will expire",
                block.id
            );
        }
        let url = image.source.url();
        // Localized images are stored relative to the site root.
        let src = if url.contains("://") {
            url.to_string()
        } else {
            format!("/{}", url.trim_start_matches('/'))
        };
        write!(
            out,
            r#"<figure class="image"><img src="{}" alt="{}">"#,
            html_escape(&src),
            html_escape(&plain_text(&image.caption))
        )?;
        if !image.caption.is_empty() {
            write!(out, "<figcaption>{}</figcaption>", self.rich(&image.caption))?;
        }
        out.push_str("</figure>");
        Ok(())
    }

    fn render_table_of_contents(&self, out: &mut String) -> Result<(), AppError> {
        if self.headings.is_empty() {
            return Ok(());
        }
        out.push_str(r#"<nav class="table-of-contents"><ul>"#);
        for heading in self.headings.values() {
            write!(
                out,
                r##"<li style="padding-left: {}px"><a href="#{}">{}</a></li>"##,
                (heading.level.saturating_sub(1) as usize) * 20,
                html_escape(&heading.slug),
                html_escape(&heading.text)
            )?;
        }
        out.push_str("</ul></nav>");
        Ok(())
    }

    fn not_implemented(&self, block: &Block, out: &mut String) {
        log::warn!(
            "Block {} on page {}: type {} not implemented",
            block.id,
            self.page_id,
            block.block_type()
        );
        out.push_str(&format!(
            r#"<div class="not-implemented">{} not implemented</div>"#,
            block.block_type()
        ));
    }
}

/// Assigns anchors to every heading of a block forest, depth-first.
fn collect_headings(
    blocks: &[Block],
    slugger: &mut HeadingSlugger,
    headings: &mut IndexMap<NotionId, HeadingAnchor>,
) {
    for block in blocks {
        if let (Some(level), Some(rich_text)) = (block.heading_level(), block.rich_text()) {
            let text = plain_text(rich_text);
            let slug = slugger.slug(&text);
            headings.insert(block.id.clone(), HeadingAnchor { level, text, slug });
        }
        collect_headings(&block.children, slugger, headings);
    }
}

/// The video id of a YouTube watch, short or `youtu.be` link.
pub fn youtube_id(raw: &str) -> Option<String> {
    let url = url::Url::parse(raw).ok()?;
    let host = url.host_str()?;
    let last_segment = || {
        url.path_segments()
            .and_then(|mut segments| segments.next_back().map(str::to_string))
            .filter(|segment| !segment.is_empty())
    };

    if host == "youtu.be" {
        return last_segment();
    }
    if !host.ends_with("youtube.com") {
        return None;
    }
    if url.path().starts_with("/shorts") || url.path().starts_with("/embed") {
        return last_segment();
    }
    url.query_pairs()
        .find(|(key, _)| key == "v")
        .map(|(_, value)| value.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::graph::load_graph;
    use crate::model::{HeadingBlock, NotionObject, Parent, TableBlock, TableRowBlock, TextBlock};
    use crate::types::{PropertyKind, PropertyValue};
    use pretty_assertions::assert_eq;

    const HOME: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
    const OTHER: &str = "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

    fn titled(id: &str, parent: Parent, title: &str) -> Page {
        Page::new(id, parent).with_property(
            "Name",
            PropertyValue {
                id: "title".into(),
                value: PropertyKind::Title {
                    title: vec![RichText::plain(title)],
                },
            },
        )
    }

    fn heading(id: &str, text: &str) -> Block {
        Block::new(
            id,
            Parent::page(HOME),
            BlockContent::Heading2 {
                heading_2: HeadingBlock {
                    rich_text: vec![RichText::plain(text)],
                    color: Color::Default,
                    is_toggleable: false,
                },
            },
        )
    }

    fn bullet(id: &str, text: &str) -> Block {
        Block::new(
            id,
            Parent::page(HOME),
            BlockContent::BulletedListItem {
                bulleted_list_item: TextBlock::new(vec![RichText::plain(text)]),
            },
        )
    }

    fn render_home(children: Vec<Block>) -> String {
        let home = titled(HOME, Parent::Workspace, "Home").with_children(children);
        let other = titled(OTHER, Parent::page(HOME), "Other Page");
        let graph = load_graph(
            vec![NotionObject::Page(home), NotionObject::Page(other)],
            &NotionId::new(HOME),
        )
        .unwrap();
        let site = SiteConfig::new(HOME, OTHER, "https://example.com", "Site");
        let view = ViewEngine::new(&graph, &site);
        let page = graph.root_page().unwrap();
        let mut slugger = HeadingSlugger::new();
        let renderer = BlockRenderer::new(&view, page, &mut slugger);
        renderer.render(&page.children).unwrap()
    }

    #[test]
    fn duplicate_headings_get_distinct_anchors() {
        let html = render_home(vec![
            heading("11111111111111111111111111111111", "Setup"),
            heading("22222222222222222222222222222222", "Setup"),
        ]);
        assert!(html.contains(r#"<h2 id="setup" class="heading">"#));
        assert!(html.contains(r#"<h2 id="setup_0" class="heading">"#));
    }

    #[test]
    fn table_of_contents_matches_heading_anchors() {
        let toc = Block::new(
            "33333333333333333333333333333333",
            Parent::page(HOME),
            BlockContent::TableOfContents,
        );
        let html = render_home(vec![
            toc,
            heading("11111111111111111111111111111111", "Intro"),
            heading("22222222222222222222222222222222", "Intro"),
        ]);
        assert!(html.contains(r##"<a href="#intro">Intro</a></li>"##));
        assert!(html.contains(r##"<a href="#intro_0">Intro</a></li>"##));
    }

    #[test]
    fn consecutive_list_items_share_one_list() {
        let html = render_home(vec![
            bullet("11111111111111111111111111111111", "one"),
            bullet("22222222222222222222222222222222", "two"),
            Block::paragraph("33333333333333333333333333333333", Parent::page(HOME), vec![]),
            bullet("44444444444444444444444444444444", "three"),
        ]);
        assert_eq!(html.matches("<ul>").count(), 2);
        assert!(html.starts_with("<ul><li>one</li><li>two</li></ul>"));
        assert!(html.ends_with("<ul><li>three</li></ul>"));
    }

    #[test]
    fn unsupported_blocks_leave_a_visible_marker() {
        let html = render_home(vec![Block::new(
            "11111111111111111111111111111111",
            Parent::page(HOME),
            BlockContent::Unsupported,
        )]);
        assert_eq!(
            html,
            r#"<div class="not-implemented">unsupported not implemented</div>"#
        );
    }

    #[test]
    fn mentions_link_to_short_urls_and_text_is_escaped() {
        let html = render_home(vec![Block::paragraph(
            "11111111111111111111111111111111",
            Parent::page(HOME),
            vec![
                RichText::plain("a < b & "),
                RichText::page_mention(NotionId::new(OTHER), "Other Page"),
                RichText::page_mention(NotionId::new("cccccccccccccccccccccccccccccccc"), "Gone"),
            ],
        )]);
        assert!(html.contains("a &lt; b &amp; "));
        assert!(html.contains(r#"<a class="mention" href="/otherpage.html">Other Page</a>"#));
        assert!(html.ends_with("Gone</p>"));
    }

    #[test]
    fn tables_mark_header_cells() {
        let row = |id: &str, a: &str, b: &str| {
            Block::new(
                id,
                Parent::block("55555555555555555555555555555555"),
                BlockContent::TableRow {
                    table_row: TableRowBlock {
                        cells: vec![vec![RichText::plain(a)], vec![RichText::plain(b)]],
                    },
                },
            )
        };
        let table = Block::new(
            "55555555555555555555555555555555",
            Parent::page(HOME),
            BlockContent::Table {
                table: TableBlock {
                    table_width: 2,
                    has_column_header: true,
                    has_row_header: false,
                },
            },
        )
        .with_children(vec![
            row("66666666666666666666666666666666", "k", "v"),
            row("77777777777777777777777777777777", "1", "2"),
        ]);

        let html = render_home(vec![table]);
        assert!(html.contains("<tr><th>k</th><th>v</th></tr><tr><td>1</td><td>2</td></tr>"));
    }

    #[test]
    fn youtube_ids_come_from_every_link_shape() {
        assert_eq!(youtube_id("https://youtu.be/abc123").as_deref(), Some("abc123"));
        assert_eq!(
            youtube_id("https://www.youtube.com/watch?v=xyz&t=10").as_deref(),
            Some("xyz")
        );
        assert_eq!(
            youtube_id("https://www.youtube.com/shorts/short1").as_deref(),
            Some("short1")
        );
        assert_eq!(youtube_id("https://vimeo.com/123?v=1"), None);
    }
}
