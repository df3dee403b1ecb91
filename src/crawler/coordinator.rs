//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop that coordinates all aspects of
//! the crawling process, including:
//! - Creating the run's output directory and seeding the frontier
//! - Fetching every frontier URL once per enabled variant
//! - Persisting HTML responses under their mapped paths
//! - Extracting, canonicalizing and enqueueing new links

use crate::config::{validate, Config};
use crate::crawler::fetcher::{classify_response, variant_headers, Fetch};
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::{build_extractor, ExtractLinks};
use crate::output::CrawlStatistics;
use crate::state::CrawlVariant;
use crate::storage::{run_directory, DocumentStore};
use crate::url::{map_path, CanonicalUrl, Canonicalizer};
use crate::{FetchError, MirrorError};
use chrono::Local;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Lifecycle of a crawl run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// The frontier may still hold work
    Running,
    /// The frontier has been drained
    Done,
}

/// A single crawl session
///
/// Owns every piece of mutable crawl state, so independent runs never share
/// a frontier or a seen set.
pub struct CrawlRun<F, S> {
    canonicalizer: Canonicalizer,
    output_root: PathBuf,
    variants: Vec<CrawlVariant>,
    frontier: Frontier,
    extractor: Box<dyn ExtractLinks>,
    fetcher: F,
    store: S,
    stats: CrawlStatistics,
    state: RunState,
}

impl<F: Fetch, S: DocumentStore> CrawlRun<F, S> {
    /// Creates a run writing into a timestamped directory under the configured output directory
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    /// * `fetcher` - The HTTP capability pages are requested through
    /// * `store` - The filesystem capability documents are written through
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlRun)` - Run created, output directory exists, root URL queued
    /// * `Err(MirrorError)` - Invalid configuration or the directory could not be created
    pub fn new(config: &Config, fetcher: F, store: S) -> Result<Self, MirrorError> {
        let output_root = run_directory(Path::new(&config.crawl.output_directory), &Local::now());
        Self::with_output_root(config, output_root, fetcher, store)
    }

    /// Creates a run writing into exactly `output_root`
    pub fn with_output_root(
        config: &Config,
        output_root: PathBuf,
        fetcher: F,
        store: S,
    ) -> Result<Self, MirrorError> {
        validate(config)?;

        let canonicalizer = Canonicalizer::new(&config.root_url())?;
        let extractor = build_extractor(config.crawl.link_extractor, canonicalizer.root_str())?;

        let mut frontier = Frontier::from_config(&config.frontier);
        for entry in &config.crawl.ignore {
            if let Some(url) = canonicalizer.resolve(entry) {
                frontier.ignore(url);
            }
        }

        store
            .ensure_directory(&output_root)
            .map_err(|source| MirrorError::Io {
                path: output_root.clone(),
                source,
            })?;

        // Seed through push so the root is in the seen set like any other URL
        frontier.push(canonicalizer.root());

        tracing::info!(
            "Created crawl run for {} in {}",
            canonicalizer.root_str(),
            output_root.display()
        );

        Ok(Self {
            canonicalizer,
            output_root,
            variants: config.enabled_variants(),
            frontier,
            extractor,
            fetcher,
            store,
            stats: CrawlStatistics::default(),
            state: RunState::Running,
        })
    }

    /// Runs the crawl until the frontier is empty
    ///
    /// Per-URL failures are logged and counted; only filesystem errors abort
    /// the run.
    pub async fn run(&mut self) -> Result<CrawlStatistics, MirrorError> {
        tracing::info!(
            "Starting crawl of {} with variants {:?}",
            self.canonicalizer.root_str(),
            self.variants
        );
        let start_time = Instant::now();

        while let Some(url) = self.frontier.pop() {
            tracing::debug!("Processing URL: {}", url);
            self.stats.urls_visited += 1;

            for variant in self.variants.clone() {
                self.crawl_variant(&url, variant).await?;
            }

            if self.stats.urls_visited % 10 == 0 {
                tracing::info!(
                    "Progress: {} URLs visited, {} in frontier, {} documents persisted",
                    self.stats.urls_visited,
                    self.frontier.len(),
                    self.stats.documents_persisted
                );
            }
        }

        self.state = RunState::Done;
        tracing::info!(
            "Frontier is empty, crawl complete: {} URLs visited in {:?}",
            self.stats.urls_visited,
            start_time.elapsed()
        );

        Ok(self.stats.clone())
    }

    /// Fetches one URL with one variant and handles the outcome
    async fn crawl_variant(
        &mut self,
        url: &CanonicalUrl,
        variant: CrawlVariant,
    ) -> Result<(), MirrorError> {
        self.stats.fetches += 1;

        let body = match self.fetch_page(url, variant).await {
            Ok(body) => body,
            Err(error) => {
                report_fetch_error(&error, variant);
                self.stats.record_error(&error);
                return Ok(());
            }
        };

        let path = match map_path(&self.output_root, url.as_str(), variant) {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!("Cannot map {} to a storage path: {}", url, e);
                return Ok(());
            }
        };

        self.store
            .persist(&path, body.as_bytes())
            .map_err(|source| MirrorError::Io {
                path: path.clone(),
                source,
            })?;
        self.stats.documents_persisted += 1;
        tracing::info!("Downloaded {} ({})", url, variant);

        let added = self.enqueue_links(&body);
        tracing::debug!("{} new URLs queued from {}", added, url);

        Ok(())
    }

    async fn fetch_page(&self, url: &CanonicalUrl, variant: CrawlVariant) -> Result<String, FetchError> {
        let response = self
            .fetcher
            .fetch(url.as_str(), &variant_headers(variant))
            .await?;
        classify_response(url.as_str(), response)
    }

    /// Pushes every link found in `body`, returning how many were new
    fn enqueue_links(&mut self, body: &str) -> usize {
        let mut added = 0;
        for link in self.extractor.links(body) {
            let url = self.canonicalizer.canonicalize(&link);
            if self.frontier.push(url) {
                added += 1;
            }
        }
        self.stats.links_enqueued += added as u64;
        added
    }

    /// The run's root URL
    pub fn root(&self) -> CanonicalUrl {
        self.canonicalizer.root()
    }

    /// Directory all of this run's documents are written under
    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Variants crawled for every URL, in order
    pub fn variants(&self) -> &[CrawlVariant] {
        &self.variants
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn stats(&self) -> &CrawlStatistics {
        &self.stats
    }

    pub fn state(&self) -> RunState {
        self.state
    }
}

fn report_fetch_error(error: &FetchError, variant: CrawlVariant) {
    if error.is_silent() {
        tracing::trace!("{}", error);
        return;
    }

    match error {
        FetchError::Blocked { url, .. } => {
            tracing::warn!("Bot detection blocked us from crawling {} ({})", url, variant);
        }
        FetchError::UnexpectedStatus { url, status, body } => {
            tracing::error!("Invalid status code ({}) for {} ({})", status, url, variant);
            tracing::debug!("Response body for {}: {}", url, body);
        }
        _ => {
            tracing::error!("{} ({})", error, variant);
        }
    }
}
