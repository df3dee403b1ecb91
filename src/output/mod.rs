//! Output module for reporting crawl results
//!
//! This module handles recording and printing per-run crawl statistics.

pub mod stats;

pub use stats::{print_statistics, CrawlStatistics};
