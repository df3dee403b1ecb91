//! Mirrorline: a breadth-first single-origin site mirror
//!
//! This crate crawls one web origin starting from its root URL, fetches every
//! reachable HTML page once per enabled browser profile, and writes each page to
//! a deterministic path derived from its URL.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod storage;
pub mod url;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Mirrorline operations
///
/// Only configuration, client setup and filesystem failures surface here.
/// Per-URL fetch failures are reported as [`FetchError`] and never abort a run.
#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Invalid link pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),
}

/// Errors isolated to a single fetch of a single URL
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Transport error for {url}: {message}")]
    Transport { url: String, message: String },

    #[error("Blocked by bot detection at {url} (HTTP {status})")]
    Blocked { url: String, status: u16 },

    #[error("Invalid status code ({status}) for {url}")]
    UnexpectedStatus {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Unsupported content type {content_type:?} for {url}")]
    UnsupportedContent {
        url: String,
        content_type: Option<String>,
    },
}

impl FetchError {
    /// Returns true for failures that are skipped silently instead of reported
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::UnsupportedContent { .. })
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid domain: {0}")]
    InvalidDomain(String),
}

/// Result type alias for Mirrorline operations
pub type Result<T> = std::result::Result<T, MirrorError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use crate::config::Config;
pub use crate::crawler::{CrawlRun, Frontier};
pub use crate::state::CrawlVariant;
pub use crate::url::{map_path, CanonicalUrl, Canonicalizer, RawLink};
