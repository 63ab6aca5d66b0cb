// src/view/database_view.rs
//! Filtered, date-sorted member lists of databases.
//!
//! Listings, feeds, the sitemap and prev/next navigation all go through
//! [`ViewEngine::pages_for_db`], so they can never disagree about order.
//! Pages without a publish date drop out of every listing but keep their
//! own URL.

use crate::config::SiteConfig;
use crate::error::AppError;
use crate::graph::ContentGraph;
use crate::model::{Database, Page};
use crate::types::{NotionId, SelectOption, TagName};
use chrono::{DateTime, FixedOffset};

/// Listing options.
#[derive(Debug, Clone, Default)]
pub struct DbViewOptions {
    /// Keep only pages carrying this tag option id.
    pub tag_filter: Option<String>,
}

impl DbViewOptions {
    pub fn tagged(tag_id: impl Into<String>) -> Self {
        DbViewOptions {
            tag_filter: Some(tag_id.into()),
        }
    }
}

/// The result of a listing query.
#[derive(Debug, Clone)]
pub struct DbView<'g> {
    pub pages: Vec<&'g Page>,
    /// The database's tag options, narrowed to the filter tag if any.
    pub tags: Vec<&'g SelectOption>,
}

/// Neighbours of a page in its collection. `previous` is older, `next` is
/// newer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Adjacent<'g> {
    pub previous: Option<&'g Page>,
    pub next: Option<&'g Page>,
}

/// A tag on a page, with its public name when the site routes it.
#[derive(Debug, Clone, Copy)]
pub struct PageTag<'a> {
    pub option: &'a SelectOption,
    pub public_name: Option<&'a TagName>,
}

pub struct ViewEngine<'g> {
    graph: &'g ContentGraph,
    site: &'g SiteConfig,
}

impl<'g> ViewEngine<'g> {
    pub fn new(graph: &'g ContentGraph, site: &'g SiteConfig) -> Self {
        ViewEngine { graph, site }
    }

    pub fn graph(&self) -> &'g ContentGraph {
        self.graph
    }

    pub fn site(&self) -> &'g SiteConfig {
        self.site
    }

    /// Member pages of a database, filtered and sorted newest first.
    ///
    /// When the database has no publish-date column the pages keep their
    /// discovery order and none are dropped.
    pub fn pages_for_db(
        &self,
        database_id: &NotionId,
        options: &DbViewOptions,
    ) -> Result<DbView<'g>, AppError> {
        let database = self.database(database_id)?;

        let mut pages: Vec<&'g Page> = database
            .children
            .iter()
            .filter_map(|id| self.graph.page(id))
            .collect();

        if let Some(tag_id) = &options.tag_filter {
            pages.retain(|page| page.tags().iter().any(|tag| tag.id == *tag_id));
        }

        if let Some(column_id) = self.publish_date_column(database) {
            let mut dated: Vec<(DateTime<FixedOffset>, &'g Page)> = pages
                .into_iter()
                .filter_map(|page| Some((self.date_by_column(page, column_id)?, page)))
                .collect();
            dated.sort_by(|(a, _), (b, _)| b.cmp(a));
            pages = dated.into_iter().map(|(_, page)| page).collect();
        }

        let tags = database
            .tag_options()
            .iter()
            .filter(|tag| {
                options
                    .tag_filter
                    .as_ref()
                    .map_or(true, |filter| tag.id == *filter)
            })
            .collect();

        Ok(DbView { pages, tags })
    }

    /// Previous and next page around `page_id` in the unfiltered listing
    /// of `database_id`. Both are `None` when the page is not listed.
    pub fn adjacent_posts(
        &self,
        page_id: &NotionId,
        database_id: &NotionId,
    ) -> Result<Adjacent<'g>, AppError> {
        let view = self.pages_for_db(database_id, &DbViewOptions::default())?;
        let Some(position) = view.pages.iter().position(|page| page.id == *page_id) else {
            return Ok(Adjacent::default());
        };

        Ok(Adjacent {
            previous: view.pages.get(position + 1).copied(),
            next: position
                .checked_sub(1)
                .and_then(|newer| view.pages.get(newer).copied()),
        })
    }

    /// Whether the database has a column named after the publish-date
    /// property.
    pub fn has_publish_date(&self, database: &Database) -> bool {
        self.publish_date_column(database).is_some()
    }

    /// A page's publish date, looked up by property name.
    ///
    /// `None` when absent, empty or unparseable.
    pub fn publish_date(&self, page: &Page) -> Option<DateTime<FixedOffset>> {
        let date = page.property(&self.site.publish_date_property)?.date()?;
        parse_logged(page, &date.start)
    }

    /// Whether the page carries a publish-date property at all, set or not.
    pub fn has_publish_date_property(&self, page: &Page) -> bool {
        page.property(&self.site.publish_date_property).is_some()
    }

    /// The page's tags, each with its public name if configured.
    pub fn page_tags<'p>(&self, page: &'p Page) -> Vec<PageTag<'p>>
    where
        'g: 'p,
    {
        page.tags()
            .iter()
            .map(|option| {
                let public_name = self.site.tag_name(&option.id);
                if public_name.is_none() {
                    log::debug!("Tag {} ({}) has no public name", option.name, option.id);
                }
                PageTag {
                    option,
                    public_name,
                }
            })
            .collect()
    }

    fn database(&self, id: &NotionId) -> Result<&'g Database, AppError> {
        self.graph.database(id).ok_or_else(|| {
            log::error!("Listing requested for unknown database {}", id);
            AppError::DanglingReference { id: id.to_string() }
        })
    }

    /// The schema id of the publish-date column. Pages are joined on the id
    /// because it survives column renames.
    pub fn publish_date_column<'d>(&self, database: &'d Database) -> Option<&'d str> {
        database
            .properties
            .get(&self.site.publish_date_property)
            .map(|column| column.id.as_str())
    }

    fn date_by_column(&self, page: &Page, column_id: &str) -> Option<DateTime<FixedOffset>> {
        let date = page.property_by_id(column_id)?.date()?;
        parse_logged(page, &date.start)
    }
}

fn parse_logged(page: &Page, raw: &str) -> Option<DateTime<FixedOffset>> {
    let parsed = crate::types::parse_notion_date(raw);
    if parsed.is_none() {
        log::warn!("Page {} has an unparseable date {:?}", page.id, raw);
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::load_graph;
    use crate::model::{NotionObject, Parent};
    use crate::types::{DatabaseProperty, DateValue, PropertyKind, PropertyValue, SchemaKind, SelectOptions};
    use pretty_assertions::assert_eq;

    const ROOT: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
    const DB: &str = "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";
    const JAN: &str = "11111111111111111111111111111111";
    const MAR: &str = "33333333333333333333333333333333";
    const UNDATED: &str = "55555555555555555555555555555555";
    const FEB: &str = "22222222222222222222222222222222";

    fn tag(id: &str) -> SelectOption {
        SelectOption {
            id: id.into(),
            name: id.to_uppercase(),
            color: Default::default(),
        }
    }

    fn post(id: &str, date: Option<&str>, tags: &[&str]) -> NotionObject {
        let page = Page::new(id, Parent::database(DB))
            .with_property(
                "Publish Date",
                PropertyValue {
                    id: "pd".into(),
                    value: PropertyKind::Date {
                        date: date.map(DateValue::new),
                    },
                },
            )
            .with_property(
                "Tags",
                PropertyValue {
                    id: "tg".into(),
                    value: PropertyKind::MultiSelect {
                        multi_select: tags.iter().map(|t| tag(t)).collect(),
                    },
                },
            );
        NotionObject::Page(page)
    }

    fn database(with_date_column: bool) -> NotionObject {
        let mut db = Database::new(DB, Parent::page(ROOT))
            .with_title("Posts")
            .with_property(DatabaseProperty {
                id: "tg".into(),
                name: "Tags".into(),
                kind: SchemaKind::MultiSelect {
                    multi_select: SelectOptions {
                        options: vec![tag("rust"), tag("life")],
                    },
                },
            });
        if with_date_column {
            db = db.with_property(DatabaseProperty {
                id: "pd".into(),
                name: "Publish Date".into(),
                kind: SchemaKind::Date,
            });
        }
        NotionObject::Database(db)
    }

    fn graph(with_date_column: bool, posts: Vec<NotionObject>) -> ContentGraph {
        let mut nodes = vec![
            NotionObject::Page(Page::new(ROOT, Parent::Workspace)),
            database(with_date_column),
        ];
        nodes.extend(posts);
        load_graph(nodes, &NotionId::new(ROOT)).unwrap()
    }

    fn site() -> SiteConfig {
        SiteConfig::new(ROOT, DB, "https://example.com", "Example")
    }

    fn ids(pages: &[&Page]) -> Vec<String> {
        pages.iter().map(|p| p.id.as_str()[..2].to_string()).collect()
    }

    #[test]
    fn dated_pages_sort_newest_first_and_undated_drop_out() {
        let graph = graph(
            true,
            vec![
                post(JAN, Some("2024-01-01"), &[]),
                post(UNDATED, None, &[]),
                post(MAR, Some("2024-03-01"), &[]),
            ],
        );
        let site = site();
        let view = ViewEngine::new(&graph, &site)
            .pages_for_db(&NotionId::new(DB), &DbViewOptions::default())
            .unwrap();

        assert_eq!(ids(&view.pages), vec!["33", "11"]);
        assert_eq!(view.tags.len(), 2);
    }

    #[test]
    fn tag_filter_narrows_pages_and_tags() {
        let graph = graph(
            true,
            vec![
                post(JAN, Some("2024-01-01"), &["rust"]),
                post(MAR, Some("2024-03-01"), &["life"]),
            ],
        );
        let site = site();
        let view = ViewEngine::new(&graph, &site)
            .pages_for_db(&NotionId::new(DB), &DbViewOptions::tagged("rust"))
            .unwrap();

        assert_eq!(ids(&view.pages), vec!["11"]);
        assert_eq!(view.tags, vec![&tag("rust")]);
    }

    #[test]
    fn without_a_date_column_order_and_membership_are_kept() {
        let graph = graph(
            false,
            vec![post(JAN, Some("2024-01-01"), &[]), post(UNDATED, None, &[])],
        );
        let site = site();
        let view = ViewEngine::new(&graph, &site)
            .pages_for_db(&NotionId::new(DB), &DbViewOptions::default())
            .unwrap();

        assert_eq!(ids(&view.pages), vec!["11", "55"]);
    }

    #[test]
    fn equal_dates_keep_discovery_order() {
        let graph = graph(
            true,
            vec![
                post(FEB, Some("2024-02-01"), &[]),
                post(JAN, Some("2024-02-01"), &[]),
            ],
        );
        let site = site();
        let view = ViewEngine::new(&graph, &site)
            .pages_for_db(&NotionId::new(DB), &DbViewOptions::default())
            .unwrap();

        assert_eq!(ids(&view.pages), vec!["22", "11"]);
    }

    #[test]
    fn adjacency_stops_at_both_ends() {
        let graph = graph(
            true,
            vec![
                post(JAN, Some("2024-01-01"), &[]),
                post(FEB, Some("2024-02-01T10:00:00Z"), &[]),
                post(MAR, Some("2024-03-01"), &[]),
            ],
        );
        let site = site();
        let engine = ViewEngine::new(&graph, &site);
        let db = NotionId::new(DB);

        let earliest = engine.adjacent_posts(&NotionId::new(JAN), &db).unwrap();
        assert!(earliest.previous.is_none());
        assert_eq!(earliest.next.map(|p| p.id.clone()), Some(NotionId::new(FEB)));

        let latest = engine.adjacent_posts(&NotionId::new(MAR), &db).unwrap();
        assert!(latest.next.is_none());
        assert_eq!(latest.previous.map(|p| p.id.clone()), Some(NotionId::new(FEB)));

        let unlisted = engine.adjacent_posts(&NotionId::new(ROOT), &db).unwrap();
        assert!(unlisted.previous.is_none() && unlisted.next.is_none());
    }

    #[test]
    fn unparseable_dates_count_as_missing() {
        let graph = graph(true, vec![post(JAN, Some("someday"), &[])]);
        let site = site();
        let engine = ViewEngine::new(&graph, &site);

        let view = engine
            .pages_for_db(&NotionId::new(DB), &DbViewOptions::default())
            .unwrap();
        assert!(view.pages.is_empty());
        assert!(engine.publish_date(graph.page(&NotionId::new(JAN)).unwrap()).is_none());
    }

    #[test]
    fn unknown_databases_are_fatal() {
        let graph = graph(true, vec![]);
        let site = site();
        assert!(ViewEngine::new(&graph, &site)
            .pages_for_db(&NotionId::new(JAN), &DbViewOptions::default())
            .is_err());
    }
}
