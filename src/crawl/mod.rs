// src/crawl/mod.rs
//! Discovery of every page and database reachable from the root.

mod crawler;
mod frontier;

pub use crawler::{CrawlOptions, CrawlReport, Crawler};
pub use frontier::Frontier;
