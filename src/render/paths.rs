// src/render/paths.rs
//! Where every generated artifact lives, relative to the output directory.

use crate::types::{NotionId, TagName};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedKind {
    Rss,
    Atom,
}

impl FeedKind {
    pub const ALL: [FeedKind; 2] = [FeedKind::Rss, FeedKind::Atom];

    pub fn file_name(&self) -> &'static str {
        match self {
            FeedKind::Rss => "rss.xml",
            FeedKind::Atom => "atom.xml",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FeedKind::Rss => "rss",
            FeedKind::Atom => "atom",
        }
    }
}

/// A site-relative output path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SitePath<'a> {
    /// A page, under its short URL.
    Page { short_url: &'a str },
    Database { id: &'a NotionId },
    Tag { tag: &'a TagName },
    Feed {
        kind: FeedKind,
        tag: Option<&'a TagName>,
    },
    Newsletter { tag: Option<&'a TagName> },
    Sitemap,
    /// The old id-based location of a page, kept as a redirect.
    Redirect { id: &'a NotionId },
}

impl SitePath<'_> {
    pub fn relative(&self) -> String {
        match self {
            SitePath::Page { short_url } => format!("{}.html", short_url),
            SitePath::Database { id } => format!("db/{}.html", id),
            SitePath::Tag { tag } => format!("tag/{}.html", tag),
            SitePath::Feed { kind, tag: None } => kind.file_name().to_string(),
            SitePath::Feed {
                kind,
                tag: Some(tag),
            } => format!("tag/{}/{}", tag, kind.file_name()),
            SitePath::Newsletter { tag: None } => "newsletter.html".to_string(),
            SitePath::Newsletter { tag: Some(tag) } => format!("tag/{}/newsletter.html", tag),
            SitePath::Sitemap => "sitemap.xml".to_string(),
            SitePath::Redirect { id } => format!("{}.html", id),
        }
    }

    /// Root-relative link target, e.g. `/tag/rust.html`.
    pub fn href(&self) -> String {
        format!("/{}", self.relative())
    }

    pub fn to_path_buf(&self) -> PathBuf {
        PathBuf::from(self.relative())
    }
}

impl fmt::Display for SitePath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.relative())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn every_artifact_has_a_fixed_location() {
        let tag = TagName::new("rust").unwrap();
        let id = NotionId::new("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");

        assert_eq!(SitePath::Page { short_url: "abc" }.relative(), "abc.html");
        assert_eq!(
            SitePath::Database { id: &id }.relative(),
            "db/aaaaaaaa-aaaa-aaaa-aaaa-aaaaaaaaaaaa.html"
        );
        assert_eq!(SitePath::Tag { tag: &tag }.href(), "/tag/rust.html");
        assert_eq!(
            SitePath::Feed {
                kind: FeedKind::Atom,
                tag: Some(&tag)
            }
            .relative(),
            "tag/rust/atom.xml"
        );
        assert_eq!(
            SitePath::Feed {
                kind: FeedKind::Rss,
                tag: None
            }
            .relative(),
            "rss.xml"
        );
        assert_eq!(
            SitePath::Newsletter { tag: Some(&tag) }.relative(),
            "tag/rust/newsletter.html"
        );
        assert_eq!(SitePath::Sitemap.relative(), "sitemap.xml");
        assert_eq!(
            SitePath::Redirect { id: &id }.relative(),
            "aaaaaaaa-aaaa-aaaa-aaaa-aaaaaaaaaaaa.html"
        );
    }
}
