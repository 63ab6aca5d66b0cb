// src/view/short_url.rs
//! Durable per-page short URLs.
//!
//! These end up in published, bookmarked links, so the derivation must not
//! change between builds while the page's property or title is unchanged.

use crate::constants::{ID_SLUG_PREFIX_LEN, TITLE_SLUG_MAX_LEN};
use crate::model::Page;

/// The short identifier of a page, first match wins:
///
/// 1. the home page is always `index`;
/// 2. the configured short-URL property, verbatim, when non-empty;
/// 3. the title, lowercased, stripped to ASCII letters and digits, cut to
///    ten characters;
/// 4. the first five characters of the id, lowercased.
pub fn short_url(page: &Page, short_url_property: &str) -> String {
    if page.id.is_index() {
        return page.id.to_string();
    }

    if let Some(explicit) = page
        .property(short_url_property)
        .and_then(|property| property.as_plain_text())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
    {
        return explicit;
    }

    if let Some(slug) = page
        .title()
        .map(|title| sanitize_title(&title))
        .filter(|slug| !slug.is_empty())
    {
        return slug;
    }

    page.id.short_prefix(ID_SLUG_PREFIX_LEN)
}

fn sanitize_title(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(TITLE_SLUG_MAX_LEN)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Parent;
    use crate::types::{PropertyKind, PropertyValue, RichText};
    use pretty_assertions::assert_eq;

    const PROPERTY: &str = "short url";

    fn text(title: &str) -> Vec<RichText> {
        vec![RichText::plain(title)]
    }

    fn page(title: Option<&str>, short: Option<&str>) -> Page {
        let mut page = Page::new("c0ffee00c0ffee00c0ffee00c0ffee00", Parent::Workspace);
        if let Some(title) = title {
            page = page.with_property(
                "Name",
                PropertyValue {
                    id: "title".into(),
                    value: PropertyKind::Title { title: text(title) },
                },
            );
        }
        if let Some(short) = short {
            page = page.with_property(
                PROPERTY,
                PropertyValue {
                    id: "s%3A".into(),
                    value: PropertyKind::Text {
                        rich_text: text(short),
                    },
                },
            );
        }
        page
    }

    #[test]
    fn explicit_property_wins_over_the_title() {
        assert_eq!(short_url(&page(Some("First Title"), Some("abc")), PROPERTY), "abc");
        assert_eq!(short_url(&page(Some("Renamed!"), Some("abc")), PROPERTY), "abc");
    }

    #[test]
    fn titles_are_sanitized_and_truncated() {
        assert_eq!(
            short_url(&page(Some("Hello, World: Part 2"), None), PROPERTY),
            "helloworld"
        );
        assert_eq!(short_url(&page(Some("Go!"), Some("  ")), PROPERTY), "go");
    }

    #[test]
    fn untitled_pages_fall_back_to_the_id() {
        assert_eq!(short_url(&page(None, None), PROPERTY), "c0ffe");
        assert_eq!(short_url(&page(Some("¿¡!?"), None), PROPERTY), "c0ffe");
    }

    #[test]
    fn home_is_always_index() {
        let mut home = page(Some("Home"), Some("start"));
        home.id = crate::types::NotionId::index();
        assert_eq!(short_url(&home, PROPERTY), "index");
    }
}
