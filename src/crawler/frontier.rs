//! Crawl frontier: the FIFO work queue and its deduplication sets
//!
//! Insertion order is visit order, which makes the crawl breadth-first. A URL
//! enters the queue at most once for the lifetime of a run.

use crate::config::{FrontierConfig, SeenSetKind};
use crate::state::{BloomSeenSet, ExactSeenSet, SeenSet};
use crate::url::CanonicalUrl;
use std::collections::{HashSet, VecDeque};

/// Queue of canonical URLs awaiting fetch
pub struct Frontier {
    /// URLs waiting to be fetched, head is next
    queue: VecDeque<CanonicalUrl>,

    /// Every URL that has ever been queued
    seen: Box<dyn SeenSet>,

    /// URLs that are never queued
    ignore: HashSet<CanonicalUrl>,
}

impl Frontier {
    /// Creates an empty frontier backed by an exact seen set
    pub fn new() -> Self {
        Self::with_seen_set(Box::new(ExactSeenSet::new()))
    }

    /// Creates an empty frontier with the seen set chosen in `config`
    pub fn from_config(config: &FrontierConfig) -> Self {
        let seen: Box<dyn SeenSet> = match config.seen_set {
            SeenSetKind::Exact => Box::new(ExactSeenSet::new()),
            SeenSetKind::Bloom => Box::new(BloomSeenSet::new(config.bloom_words)),
        };
        Self::with_seen_set(seen)
    }

    /// Creates an empty frontier over a caller-supplied seen set
    pub fn with_seen_set(seen: Box<dyn SeenSet>) -> Self {
        Self {
            queue: VecDeque::new(),
            seen,
            ignore: HashSet::new(),
        }
    }

    /// Adds `url` to the ignore set; it will never be queued afterwards
    pub fn ignore(&mut self, url: CanonicalUrl) {
        self.ignore.insert(url);
    }

    /// Queues `url` unless it was seen before or is ignored
    ///
    /// Returns true if the URL was appended to the queue.
    pub fn push(&mut self, url: CanonicalUrl) -> bool {
        if self.ignore.contains(&url) {
            return false;
        }
        if !self.seen.insert(url.as_str()) {
            return false;
        }
        self.queue.push_back(url);
        true
    }

    /// Removes and returns the oldest queued URL, or None when the crawl is done
    pub fn pop(&mut self) -> Option<CanonicalUrl> {
        self.queue.pop_front()
    }

    /// Number of URLs waiting in the queue
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of distinct URLs ever queued
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    /// Returns true if `url` has been queued at some point
    pub fn has_seen(&self, url: &CanonicalUrl) -> bool {
        self.seen.contains(url.as_str())
    }
}

impl Default for Frontier {
    fn default() -> Self {
        Self::new()
    }
}
