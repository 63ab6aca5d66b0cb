// src/main.rs

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion_site::{
    deliver, load_graph, render_site, reset_directory, BuildConfig, CommandLineInput,
    ContentStore, CrawlOptions, Crawler, DeliveryTarget, FetchConfig, NotionHttpClient,
    RunConfig,
};
use std::fs;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("notion_site.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stdout_appender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stdout")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Clears the cache and downloads everything reachable from the root page.
async fn fetch(config: &FetchConfig) -> anyhow::Result<()> {
    let store = ContentStore::open(&config.cache_dir);
    store
        .clear()
        .with_context(|| format!("clearing cache {}", config.cache_dir.display()))?;

    let client = NotionHttpClient::new(&config.api_key)?;
    let options = CrawlOptions {
        localize_images: config.localize_images,
    };
    let report = Crawler::new(&client, &store, options)
        .crawl(&config.root_page_id)
        .await
        .context("fetching content from Notion")?;

    println!(
        "Fetched {} pages, {} databases, {} blocks and {} images into {}",
        report.pages,
        report.databases,
        report.blocks,
        report.images,
        config.cache_dir.display()
    );
    Ok(())
}

/// Renders the cached content into the output directory.
fn build(config: &BuildConfig) -> anyhow::Result<()> {
    let store = ContentStore::open(&config.cache_dir);
    let nodes = store
        .read_all()
        .with_context(|| format!("reading cache {}", config.cache_dir.display()))?;
    let graph = load_graph(nodes, &config.site.root_page_id).context("loading content graph")?;

    let asset_dir = store.existing_asset_dir();
    let plan = render_site(&graph, &config.site, asset_dir.as_deref()).context("rendering site")?;

    reset_directory(&config.out_dir)?;
    let report = deliver(plan, &config.out_dir)?;

    let pages = report
        .completed
        .iter()
        .filter(|done| matches!(done.operation, DeliveryTarget::WriteFile { .. }))
        .count();
    println!(
        "Wrote {} files ({} bytes) to {}",
        pages,
        report.stats.bytes_written,
        config.out_dir.display()
    );
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose).map_err(|e| anyhow::anyhow!("failed to set up logging: {}", e))?;

    match RunConfig::resolve(cli)? {
        RunConfig::Fetch(config) => fetch(&config).await,
        RunConfig::Build(config) => build(&config),
    }
}
