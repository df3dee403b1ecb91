//! Mirrorline main entry point
//!
//! This is the command-line interface for the Mirrorline site mirror.

use anyhow::Context;
use clap::Parser;
use mirrorline::config::{read_config, validate, Config};
use mirrorline::crawler::crawl;
use mirrorline::output::print_statistics;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Mirrorline: a breadth-first single-origin site mirror
///
/// Mirrorline starts at a domain's root URL, follows every same-origin link
/// breadth-first and writes each HTML page to disk, once per enabled browser
/// profile.
#[derive(Parser, Debug)]
#[command(name = "mirrorline")]
#[command(version = "1.0.0")]
#[command(about = "A breadth-first single-origin site mirror", long_about = None)]
struct Cli {
    /// Domain to crawl, without scheme or subdomain (e.g. example.com)
    #[arg(value_name = "DOMAIN")]
    domain: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Base directory for crawl output
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<String>,

    /// Do not crawl with the desktop Chrome profile
    #[arg(long)]
    disable_chrome_macos: bool,

    /// Also crawl with the iOS Safari profile
    #[arg(long)]
    enable_ios: bool,

    /// Also crawl with the Android Chrome profile
    #[arg(long)]
    enable_android: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    /// Applies command-line flags on top of `config`
    fn apply(&self, config: &mut Config) {
        if let Some(domain) = &self.domain {
            config.crawl.domain = domain.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.crawl.output_directory = dir.clone();
        }
        if self.disable_chrome_macos {
            config.variants.desktop_chrome = false;
        }
        if self.enable_ios {
            config.variants.mobile_ios = true;
        }
        if self.enable_android {
            config.variants.mobile_android = true;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = resolve_config(&cli)?;

    if cli.dry_run {
        handle_dry_run(&config);
    } else {
        handle_crawl(&config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("mirrorline=info,warn"),
            1 => EnvFilter::new("mirrorline=debug,info"),
            2 => EnvFilter::new("mirrorline=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the optional config file, merges CLI flags and validates the result
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            read_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => Config::new(""),
    };

    cli.apply(&mut config);

    if let Err(e) = validate(&config) {
        tracing::error!("Invalid configuration: {}", e);
        return Err(e.into());
    }

    Ok(config)
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== Mirrorline Dry Run ===\n");

    println!("Crawl:");
    println!("  Domain: {}", config.crawl.domain);
    println!("  Root URL: {}", config.root_url());
    println!("  Output directory: {}", config.crawl.output_directory);
    println!("  Link extractor: {:?}", config.crawl.link_extractor);

    println!("\nVariants:");
    for variant in config.enabled_variants() {
        println!("  - {} ({})", variant, variant.user_agent());
    }

    println!("\nIgnored URLs ({}):", config.crawl.ignore.len());
    for entry in &config.crawl.ignore {
        println!("  - {}", entry);
    }

    println!("\nHTTP:");
    match config.http.request_timeout_secs {
        Some(secs) => println!("  Request timeout: {}s", secs),
        None => println!("  Request timeout: none"),
    }
    match config.http.connect_timeout_secs {
        Some(secs) => println!("  Connect timeout: {}s", secs),
        None => println!("  Connect timeout: none"),
    }

    println!("\nFrontier:");
    println!("  Seen set: {:?}", config.frontier.seen_set);

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config) -> anyhow::Result<()> {
    let start = Instant::now();

    match crawl(config).await {
        Ok(stats) => {
            tracing::info!("Crawl completed successfully");
            print_statistics(&stats, start.elapsed());
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
