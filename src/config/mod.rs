//! Configuration module for Mirrorline
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use mirrorline::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("mirrorline.toml")).unwrap();
//! println!("Crawl will start at: {}", config.root_url());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlConfig, ExtractorKind, FrontierConfig, HttpConfig, SeenSetKind, VariantConfig,
};

// Re-export parser functions
pub use parser::{load_config, parse_config, read_config};
pub use validation::validate;
