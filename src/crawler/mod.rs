//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching and response classification
//! - Link extraction from fetched documents
//! - The breadth-first frontier
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod frontier;
mod parser;

pub use coordinator::{CrawlRun, RunState};
pub use fetcher::{
    build_http_client, classify_response, variant_headers, Fetch, FetchResponse, HttpFetcher,
    BLOCKED_MARKER, BLOCKED_STATUS,
};
pub use frontier::Frontier;
pub use parser::{build_extractor, ExtractLinks, HtmlExtractor, Links, PatternExtractor};

use crate::config::Config;
use crate::output::CrawlStatistics;
use crate::storage::FsStore;
use crate::MirrorError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client
/// 2. Create the timestamped output directory
/// 3. Fetch every reachable page once per enabled variant
/// 4. Write each HTML page to its mapped path
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlStatistics)` - Crawl completed, frontier drained
/// * `Err(MirrorError)` - Invalid configuration or a filesystem failure
pub async fn crawl(config: &Config) -> Result<CrawlStatistics, MirrorError> {
    let fetcher = HttpFetcher::new(&config.http)?;
    let mut run = CrawlRun::new(config, fetcher, FsStore::new())?;
    run.run().await
}
