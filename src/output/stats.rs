//! Statistics collected during a crawl run
//!
//! Counters are updated by the engine as it goes and printed once the
//! frontier is exhausted.

use crate::FetchError;
use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStatistics {
    /// URLs popped from the frontier
    pub urls_visited: u64,

    /// Requests issued (one per URL per variant)
    pub fetches: u64,

    /// HTML documents written to disk
    pub documents_persisted: u64,

    /// New URLs added to the frontier by link extraction
    pub links_enqueued: u64,

    /// Fetches rejected by bot detection
    pub blocked: u64,

    /// Fetches answered with any other non-2xx status
    pub unexpected_status: u64,

    /// Fetches that failed below HTTP
    pub transport_errors: u64,

    /// 2xx responses skipped because they were not HTML
    pub unsupported_content: u64,
}

impl CrawlStatistics {
    /// Counts a failed fetch under its error kind
    pub fn record_error(&mut self, error: &FetchError) {
        match error {
            FetchError::Transport { .. } => self.transport_errors += 1,
            FetchError::Blocked { .. } => self.blocked += 1,
            FetchError::UnexpectedStatus { .. } => self.unexpected_status += 1,
            FetchError::UnsupportedContent { .. } => self.unsupported_content += 1,
        }
    }

    /// Total fetches that ended in a reported error
    pub fn total_errors(&self) -> u64 {
        self.blocked + self.unexpected_status + self.transport_errors
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
/// * `elapsed` - Wall-clock duration of the run
pub fn print_statistics(stats: &CrawlStatistics, elapsed: Duration) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  URLs visited: {}", stats.urls_visited);
    println!("  Fetches issued: {}", stats.fetches);
    println!("  Documents persisted: {}", stats.documents_persisted);
    println!("  Links enqueued: {}", stats.links_enqueued);
    println!("  Duration: {:.1}s", elapsed.as_secs_f64());
    println!();

    println!("Skipped:");
    println!("  Non-HTML responses: {}", stats.unsupported_content);
    println!();

    println!("Errors ({}):", stats.total_errors());
    println!("  Blocked by bot detection: {}", stats.blocked);
    println!("  Unexpected status: {}", stats.unexpected_status);
    println!("  Transport errors: {}", stats.transport_errors);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_error() {
        let mut stats = CrawlStatistics::default();
        let url = "https://www.example.com/".to_string();

        stats.record_error(&FetchError::Blocked {
            url: url.clone(),
            status: 403,
        });
        stats.record_error(&FetchError::UnexpectedStatus {
            url: url.clone(),
            status: 500,
            body: String::new(),
        });
        stats.record_error(&FetchError::Transport {
            url: url.clone(),
            message: "refused".to_string(),
        });
        stats.record_error(&FetchError::UnsupportedContent {
            url,
            content_type: None,
        });

        assert_eq!(stats.blocked, 1);
        assert_eq!(stats.unexpected_status, 1);
        assert_eq!(stats.transport_errors, 1);
        assert_eq!(stats.unsupported_content, 1);
        assert_eq!(stats.total_errors(), 3);
    }
}
