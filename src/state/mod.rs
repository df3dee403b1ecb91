//! State module for per-run crawl state
//!
//! # Components
//!
//! - `CrawlVariant`: The browser profiles a run can crawl with
//! - `SeenSet`: Deduplication sets backing the frontier

mod seen_set;
mod variant;

// Re-export main types
pub use seen_set::{BloomSeenSet, ExactSeenSet, SeenSet};
pub use variant::CrawlVariant;
