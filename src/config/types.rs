use crate::state::CrawlVariant;
use serde::Deserialize;

/// Main configuration structure for Mirrorline
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawl: CrawlConfig,
    #[serde(default)]
    pub variants: VariantConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub frontier: FrontierConfig,
}

impl Config {
    /// Creates a configuration for `domain` with every other setting at its default
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            crawl: CrawlConfig {
                domain: domain.into(),
                ..CrawlConfig::default()
            },
            variants: VariantConfig::default(),
            http: HttpConfig::default(),
            frontier: FrontierConfig::default(),
        }
    }

    /// Returns the crawl's root URL, e.g. `https://www.example.com/`
    pub fn root_url(&self) -> String {
        let crawl = &self.crawl;
        if crawl.preferred_host.is_empty() {
            format!("{}://{}/", crawl.preferred_protocol, crawl.domain)
        } else {
            format!(
                "{}://{}.{}/",
                crawl.preferred_protocol, crawl.preferred_host, crawl.domain
            )
        }
    }

    /// Returns the enabled variants in crawl order
    pub fn enabled_variants(&self) -> Vec<CrawlVariant> {
        let mut variants = Vec::new();
        if self.variants.desktop_chrome {
            variants.push(CrawlVariant::Default);
        }
        if self.variants.mobile_ios {
            variants.push(CrawlVariant::Ios);
        }
        if self.variants.mobile_android {
            variants.push(CrawlVariant::Android);
        }
        variants
    }
}

/// What to crawl and where to put it
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// Registrable domain to crawl, without subdomain (e.g. "example.com")
    #[serde(default)]
    pub domain: String,

    /// Base directory; each run writes into a timestamped child
    #[serde(rename = "output-directory", default = "default_output_directory")]
    pub output_directory: String,

    /// Subdomain prepended to `domain`; empty means none
    #[serde(rename = "preferred-host", default = "default_preferred_host")]
    pub preferred_host: String,

    /// Scheme of every canonical URL
    #[serde(rename = "preferred-protocol", default = "default_preferred_protocol")]
    pub preferred_protocol: String,

    /// URLs that are never enqueued (root-relative or absolute same-origin)
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Which link extractor scans fetched pages
    #[serde(rename = "link-extractor", default)]
    pub link_extractor: ExtractorKind,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            domain: String::new(),
            output_directory: default_output_directory(),
            preferred_host: default_preferred_host(),
            preferred_protocol: default_preferred_protocol(),
            ignore: Vec::new(),
            link_extractor: ExtractorKind::default(),
        }
    }
}

/// Which browser profiles to crawl with
#[derive(Debug, Clone, Deserialize)]
pub struct VariantConfig {
    #[serde(rename = "desktop-chrome", default = "default_true")]
    pub desktop_chrome: bool,

    #[serde(rename = "mobile-ios", default)]
    pub mobile_ios: bool,

    #[serde(rename = "mobile-android", default)]
    pub mobile_android: bool,
}

impl Default for VariantConfig {
    fn default() -> Self {
        Self {
            desktop_chrome: true,
            mobile_ios: false,
            mobile_android: false,
        }
    }
}

/// HTTP client settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HttpConfig {
    /// Whole-request timeout in seconds (none by default)
    #[serde(rename = "request-timeout-secs", default)]
    pub request_timeout_secs: Option<u64>,

    /// Connection timeout in seconds (none by default)
    #[serde(rename = "connect-timeout-secs", default)]
    pub connect_timeout_secs: Option<u64>,
}

/// Frontier deduplication settings
#[derive(Debug, Clone, Deserialize)]
pub struct FrontierConfig {
    #[serde(rename = "seen-set", default)]
    pub seen_set: SeenSetKind,

    /// Size of the bloom filter in 64-bit words, used with `seen-set = "bloom"`
    #[serde(rename = "bloom-words", default = "default_bloom_words")]
    pub bloom_words: usize,
}

impl Default for FrontierConfig {
    fn default() -> Self {
        Self {
            seen_set: SeenSetKind::default(),
            bloom_words: default_bloom_words(),
        }
    }
}

/// Link extractor implementations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractorKind {
    /// Regex scan over the raw document text
    #[default]
    Pattern,
    /// Tolerant HTML tokenizer
    Html,
}

/// Seen-set implementations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeenSetKind {
    /// Exact in-memory set
    #[default]
    Exact,
    /// Fixed-size bloom filter
    Bloom,
}

fn default_output_directory() -> String {
    "data".to_string()
}

fn default_preferred_host() -> String {
    "www".to_string()
}

fn default_preferred_protocol() -> String {
    "https".to_string()
}

fn default_bloom_words() -> usize {
    16 * 1024
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_url_with_preferred_host() {
        let config = Config::new("example.com");
        assert_eq!(config.root_url(), "https://www.example.com/");
    }

    #[test]
    fn test_root_url_without_preferred_host() {
        let mut config = Config::new("127.0.0.1:8080");
        config.crawl.preferred_host = String::new();
        config.crawl.preferred_protocol = "http".to_string();
        assert_eq!(config.root_url(), "http://127.0.0.1:8080/");
    }

    #[test]
    fn test_default_variants() {
        let config = Config::new("example.com");
        assert_eq!(config.enabled_variants(), vec![CrawlVariant::Default]);
    }

    #[test]
    fn test_all_variants_in_order() {
        let mut config = Config::new("example.com");
        config.variants.mobile_android = true;
        config.variants.mobile_ios = true;
        assert_eq!(
            config.enabled_variants(),
            vec![
                CrawlVariant::Default,
                CrawlVariant::Ios,
                CrawlVariant::Android
            ]
        );
    }
}
