// src/crawl/frontier.rs
//! Work-list and visited set driving discovery.
//!
//! # Laws
//!
//! - **L1 (Idempotency)**: marking the same id visited twice returns `false`
//!   the second time.
//! - **L2 (Persistence)**: once visited, an id stays visited; pushing it
//!   again is a no-op.
//! - **L3 (Termination)**: every `pop_next` that yields an entry is followed
//!   by marking it visited, so the visited set strictly grows and a finite
//!   id space drains the work-list.
//!
//! Pop order is unspecified by contract. The implementation is LIFO, which
//! keeps a page's children close to it in the log.

use crate::types::{NodeRef, NotionId};
use std::collections::HashSet;

#[derive(Debug, Default)]
pub struct Frontier {
    pending: Vec<NodeRef>,
    visited: HashSet<NotionId>,
}

impl Frontier {
    /// A frontier seeded with the root page.
    pub fn new(root: NotionId) -> Self {
        Frontier {
            pending: vec![NodeRef::Page(root)],
            visited: HashSet::new(),
        }
    }

    /// Queues an entry unless its id was already visited.
    ///
    /// Entries queued twice before either is visited are both kept; the
    /// second is dropped by `pop_next`.
    pub fn push(&mut self, entry: NodeRef) {
        if !self.visited.contains(entry.id()) {
            self.pending.push(entry);
        }
    }

    pub fn extend(&mut self, entries: impl IntoIterator<Item = NodeRef>) {
        for entry in entries {
            self.push(entry);
        }
    }

    /// Next entry whose id has not been visited yet.
    pub fn pop_next(&mut self) -> Option<NodeRef> {
        while let Some(entry) = self.pending.pop() {
            if !self.visited.contains(entry.id()) {
                return Some(entry);
            }
        }
        None
    }

    /// Records a visit. Returns whether this was the first one.
    pub fn mark_visited(&mut self, id: &NotionId) -> bool {
        self.visited.insert(id.clone())
    }

    pub fn is_visited(&self, id: &NotionId) -> bool {
        self.visited.contains(id)
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> NotionId {
        NotionId::new(raw)
    }

    #[test]
    fn starts_with_the_root_page() {
        let mut frontier = Frontier::new(id("root"));
        assert_eq!(frontier.pop_next(), Some(NodeRef::Page(id("root"))));
        assert_eq!(frontier.pop_next(), None);
    }

    #[test]
    fn visited_ids_are_never_returned_again() {
        let mut frontier = Frontier::new(id("a"));
        let first = frontier.pop_next().unwrap();
        assert!(frontier.mark_visited(first.id()));
        assert!(!frontier.mark_visited(first.id()));

        frontier.push(NodeRef::Page(id("a")));
        assert!(frontier.is_empty());
        assert_eq!(frontier.pop_next(), None);
    }

    #[test]
    fn duplicates_queued_before_a_visit_are_skipped() {
        let mut frontier = Frontier::new(id("a"));
        frontier.extend([NodeRef::Database(id("b")), NodeRef::Database(id("b"))]);

        let entry = frontier.pop_next().unwrap();
        assert_eq!(entry, NodeRef::Database(id("b")));
        frontier.mark_visited(entry.id());

        assert_eq!(frontier.pop_next(), Some(NodeRef::Page(id("a"))));
        assert_eq!(frontier.visited_count(), 1);
    }
}
