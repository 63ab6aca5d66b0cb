// src/crawl/crawler.rs
//! The fetch loop.
//!
//! Pops one node at a time off the [`Frontier`], assembles it (page plus
//! its resolved block tree, or database plus its rows), persists it, and
//! queues every page or database the assembled node points at. Fetches are
//! strictly sequential; the visited set is only touched between awaits.

use super::frontier::Frontier;
use crate::api::NotionRepository;
use crate::error::AppError;
use crate::model::{visit_blocks_mut, walk_bfs, Block, BlockContent, FileSource, NotionObject, Page};
use crate::model::{ExternalUrl, FileBlock};
use crate::store::ContentStore;
use crate::types::{mentioned_nodes, NodeRef, NotionId, PropertyValue};

/// Switches for one crawl.
#[derive(Debug, Clone, Copy)]
pub struct CrawlOptions {
    /// Download Notion-hosted images into the cache's asset directory.
    pub localize_images: bool,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            localize_images: true,
        }
    }
}

/// What a crawl produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlReport {
    pub pages: usize,
    pub databases: usize,
    pub blocks: usize,
    pub images: usize,
}

pub struct Crawler<'a, R: NotionRepository + ?Sized> {
    repository: &'a R,
    store: &'a ContentStore,
    options: CrawlOptions,
}

impl<'a, R: NotionRepository + ?Sized> Crawler<'a, R> {
    pub fn new(repository: &'a R, store: &'a ContentStore, options: CrawlOptions) -> Self {
        Crawler {
            repository,
            store,
            options,
        }
    }

    /// Visits every node reachable from `root`, exactly once.
    ///
    /// Any transport or storage failure aborts the crawl. Nodes persisted
    /// before the failure stay in the cache.
    pub async fn crawl(&self, root: &NotionId) -> Result<CrawlReport, AppError> {
        log::info!("Starting crawl at page {}", root);
        let mut frontier = Frontier::new(root.clone());
        let mut report = CrawlReport::default();

        while let Some(entry) = frontier.pop_next() {
            frontier.mark_visited(entry.id());
            let discovered = match &entry {
                NodeRef::Page(id) => self.visit_page(id, &mut report).await,
                NodeRef::Database(id) => self.visit_database(id, &mut report).await,
            }
            .map_err(|e| {
                log::error!("Failed to fetch {:?}: {}", entry, e);
                e
            })?;
            frontier.extend(discovered);
        }

        log::info!(
            "Crawl complete: {} pages, {} databases, {} blocks, {} images",
            report.pages,
            report.databases,
            report.blocks,
            report.images
        );
        Ok(report)
    }

    async fn visit_page(
        &self,
        id: &NotionId,
        report: &mut CrawlReport,
    ) -> Result<Vec<NodeRef>, AppError> {
        log::info!("Fetching page {}", id);
        let mut page = self.repository.retrieve_page(id).await?;
        page.children = self.repository.retrieve_children(&page.id).await?;
        resolve_children(self.repository, &mut page.children).await?;

        if self.options.localize_images {
            report.images += self.localize_images(&mut page.children).await?;
        }

        let references = page_references(&page);
        report.pages += 1;
        report.blocks += walk_bfs(&page.children).count();

        self.store.write_node(&NotionObject::Page(page))?;
        Ok(references)
    }

    async fn visit_database(
        &self,
        id: &NotionId,
        report: &mut CrawlReport,
    ) -> Result<Vec<NodeRef>, AppError> {
        log::info!("Fetching database {}", id);
        let database = self.repository.retrieve_database(id).await?;
        let rows = self.repository.query_rows(id).await?;
        log::debug!("Database {} has {} rows", id, rows.len());

        report.databases += 1;
        self.store.write_node(&NotionObject::Database(database))?;
        Ok(rows.into_iter().map(|row| NodeRef::Page(row.id)).collect())
    }

    /// Downloads Notion-hosted images and points their blocks at the copy.
    ///
    /// A failed download keeps the original URL.
    async fn localize_images(&self, blocks: &mut [Block]) -> Result<usize, AppError> {
        let mut hosted = Vec::new();
        for block in walk_bfs(blocks) {
            if let BlockContent::Image {
                image:
                    FileBlock {
                        source: FileSource::File { file },
                        ..
                    },
            } = &block.content
            {
                hosted.push((block.id.clone(), file.url.clone()));
            }
        }

        let mut localized = Vec::new();
        for (block_id, url) in hosted {
            match self.repository.download_asset(&url).await {
                Ok(bytes) => {
                    let file_name = format!("{}.{}", block_id, image_extension(&url));
                    let local = self.store.write_asset(&file_name, &bytes)?;
                    localized.push((block_id, local));
                }
                Err(e) => log::warn!("Keeping remote URL for image {}: {}", block_id, e),
            }
        }

        let count = localized.len();
        visit_blocks_mut(blocks, &mut |block: &mut Block| {
            if let BlockContent::Image { image } = &mut block.content {
                if let Some((_, local)) = localized.iter().find(|(id, _)| *id == block.id) {
                    image.source = FileSource::External {
                        external: ExternalUrl { url: local.clone() },
                    };
                }
            }
        });
        Ok(count)
    }
}

/// Fetches the children of every container block, recursively.
///
/// `child_page` and `child_database` blocks are skipped: their content is
/// a node of its own.
async fn resolve_children<R: NotionRepository + ?Sized>(
    repository: &R,
    blocks: &mut [Block],
) -> Result<(), AppError> {
    for block in blocks.iter_mut() {
        if block.needs_children() {
            log::debug!("Fetching children of {} block {}", block.block_type(), block.id);
            block.children = repository.retrieve_children(&block.id).await?;
            Box::pin(resolve_children(repository, &mut block.children)).await?;
        }
    }
    Ok(())
}

/// Every node the page points at: child pages and databases, page links,
/// and mentions in blocks or in the page's own text properties.
fn page_references(page: &Page) -> Vec<NodeRef> {
    let from_properties = page
        .properties
        .values()
        .filter_map(PropertyValue::rich_text)
        .flat_map(mentioned_nodes);
    let from_blocks = walk_bfs(&page.children).flat_map(Block::referenced_nodes);

    from_properties.chain(from_blocks).collect()
}

/// The file extension in a URL's path, `png` when there is none.
fn image_extension(raw: &str) -> String {
    url::Url::parse(raw)
        .ok()
        .and_then(|parsed| {
            let path = parsed.path().to_string();
            let name = path.rsplit('/').next()?.to_string();
            let (_, ext) = name.rsplit_once('.')?;
            (!ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
                .then(|| ext.to_ascii_lowercase())
        })
        .unwrap_or_else(|| "png".to_string())
}
