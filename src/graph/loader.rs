// src/graph/loader.rs
//! Cache documents to a linked graph.
//!
//! Order matters: link pages into their databases, index blocks, then
//! remap the configured root to `"index"`. Nothing before the remap may
//! assume the home page is called `"index"`.

use super::{BlockEntry, ContentGraph};
use crate::error::AppError;
use crate::model::{visit_blocks_mut, Block, NotionObject, Page, Parent};
use crate::types::NotionId;
use std::collections::VecDeque;

/// Builds the graph from every cached node and remaps `root` to `"index"`.
pub fn load_graph(nodes: Vec<NotionObject>, root: &NotionId) -> Result<ContentGraph, AppError> {
    let mut graph = ContentGraph::default();
    for node in nodes {
        match node {
            NotionObject::Page(page) => {
                graph.pages.insert(page.id.clone(), page);
            }
            NotionObject::Database(mut database) => {
                database.children.clear();
                graph.databases.insert(database.id.clone(), database);
            }
        }
    }

    link_database_children(&mut graph)?;
    index_blocks(&mut graph);
    remap_root(&mut graph, root)?;

    log::info!(
        "Loaded graph: {} pages, {} databases, {} blocks",
        graph.pages.len(),
        graph.databases.len(),
        graph.blocks.len()
    );
    Ok(graph)
}

/// Appends each database-parented page to its database's member list.
fn link_database_children(graph: &mut ContentGraph) -> Result<(), AppError> {
    for page in graph.pages.values() {
        if let Parent::Database { database_id } = &page.parent {
            let database = graph.databases.get_mut(database_id).ok_or_else(|| {
                log::error!("Cache is inconsistent: database {} is missing", database_id);
                AppError::MissingDatabase {
                    page_id: page.id.to_string(),
                    database_id: database_id.to_string(),
                }
            })?;
            database.children.push(page.id.clone());
        }
    }
    Ok(())
}

/// Indexes every block of every page, breadth-first, each id once.
fn index_blocks(graph: &mut ContentGraph) {
    for page in graph.pages.values() {
        let mut queue: VecDeque<&Block> = page.children.iter().collect();
        while let Some(block) = queue.pop_front() {
            if graph.blocks.contains_key(&block.id) {
                log::debug!("Block {} reachable twice; keeping first", block.id);
                continue;
            }
            graph.blocks.insert(
                block.id.clone(),
                BlockEntry {
                    parent: block.parent.clone(),
                    page_id: page.id.clone(),
                },
            );
            queue.extend(block.children.iter());
        }
    }
}

/// Rewrites every occurrence of `root` as `"index"` and re-keys the page.
fn remap_root(graph: &mut ContentGraph, root: &NotionId) -> Result<(), AppError> {
    let index = NotionId::index();
    if *root == index {
        return graph
            .pages
            .contains_key(&index)
            .then_some(())
            .ok_or_else(|| AppError::MissingRootPage(root.to_string()));
    }

    let mut root_page = graph
        .pages
        .shift_remove(root)
        .ok_or_else(|| AppError::MissingRootPage(root.to_string()))?;

    for page in graph.pages.values_mut() {
        remap_page_references(page, root, &index);
    }
    remap_page_references(&mut root_page, root, &index);
    root_page.id = index.clone();

    for database in graph.databases.values_mut() {
        database.parent.remap_page(root, &index);
        for member in database.children.iter_mut() {
            if member == root {
                *member = index.clone();
            }
        }
    }

    for entry in graph.blocks.values_mut() {
        entry.parent.remap_page(root, &index);
        if entry.page_id == *root {
            entry.page_id = index.clone();
        }
    }
    if let Some(stub) = graph.blocks.remove(root) {
        graph.blocks.insert(index.clone(), stub);
    }

    graph.pages.insert(index, root_page);
    log::debug!("Remapped root page {} to index", root);
    Ok(())
}

fn remap_page_references(page: &mut Page, old: &NotionId, new: &NotionId) {
    page.parent.remap_page(old, new);
    for property in page.properties.values_mut() {
        if let Some(run) = property.rich_text_mut() {
            for item in run.iter_mut() {
                item.remap_mention(old, new);
            }
        }
    }
    visit_blocks_mut(&mut page.children, &mut |block: &mut Block| {
        block.remap_page(old, new)
    });
}
