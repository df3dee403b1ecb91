use crate::config::types::{Config, CrawlConfig, FrontierConfig, HttpConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawl_config(&config.crawl)?;
    validate_ignore_entries(&config.crawl.ignore, &config.root_url())?;
    validate_http_config(&config.http)?;
    validate_frontier_config(&config.frontier)?;

    if config.enabled_variants().is_empty() {
        return Err(ConfigError::Validation(
            "at least one crawl variant must be enabled".to_string(),
        ));
    }

    Ok(())
}

/// Validates crawl target configuration
fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    validate_domain(&config.domain)?;

    if !config
        .preferred_host
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
    {
        return Err(ConfigError::InvalidDomain(format!(
            "preferred_host '{}' contains invalid characters",
            config.preferred_host
        )));
    }

    if config.preferred_protocol != "http" && config.preferred_protocol != "https" {
        return Err(ConfigError::Validation(format!(
            "preferred_protocol must be 'http' or 'https', got '{}'",
            config.preferred_protocol
        )));
    }

    if config.output_directory.is_empty() {
        return Err(ConfigError::Validation(
            "output_directory cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the bare domain (optionally with a port), without scheme or path
fn validate_domain(domain: &str) -> Result<(), ConfigError> {
    if domain.is_empty() {
        return Err(ConfigError::InvalidDomain(
            "domain cannot be empty".to_string(),
        ));
    }

    if domain.contains("://") {
        return Err(ConfigError::InvalidDomain(format!(
            "domain '{}' must not include a scheme",
            domain
        )));
    }

    if domain.contains('/') || domain.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidDomain(format!(
            "domain '{}' must not contain a path or whitespace",
            domain
        )));
    }

    // These would move the host out of the domain once the root URL is built
    if let Some(c) = domain.chars().find(|c| matches!(c, '@' | '?' | '#' | '\\')) {
        return Err(ConfigError::InvalidDomain(format!(
            "domain '{}' must not contain '{}'",
            domain, c
        )));
    }

    if domain.starts_with('.') || domain.ends_with('.') || domain.contains("..") {
        return Err(ConfigError::InvalidDomain(format!(
            "domain '{}' has an empty label",
            domain
        )));
    }

    Ok(())
}

/// Ignore entries must be something the canonicalizer can map onto the root
fn validate_ignore_entries(entries: &[String], root_url: &str) -> Result<(), ConfigError> {
    for entry in entries {
        if !entry.starts_with('/') && !entry.starts_with(root_url) {
            return Err(ConfigError::Validation(format!(
                "ignore entry '{}' must be root-relative or start with {}",
                entry, root_url
            )));
        }
    }
    Ok(())
}

/// Validates HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.request_timeout_secs == Some(0) {
        return Err(ConfigError::Validation(
            "request_timeout_secs must be >= 1 when set".to_string(),
        ));
    }

    if config.connect_timeout_secs == Some(0) {
        return Err(ConfigError::Validation(
            "connect_timeout_secs must be >= 1 when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates frontier configuration
fn validate_frontier_config(config: &FrontierConfig) -> Result<(), ConfigError> {
    if config.bloom_words < 1 {
        return Err(ConfigError::Validation(format!(
            "bloom_words must be >= 1, got {}",
            config.bloom_words
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_domain() {
        assert!(validate_domain("example.com").is_ok());
        assert!(validate_domain("test.example.com").is_ok());
        assert!(validate_domain("127.0.0.1:8080").is_ok());

        assert!(validate_domain("").is_err());
        assert!(validate_domain("https://example.com").is_err());
        assert!(validate_domain("example.com/path").is_err());
        assert!(validate_domain("exa mple.com").is_err());
        assert!(validate_domain(".example.com").is_err());
        assert!(validate_domain("example..com").is_err());
    }

    #[test]
    fn test_userinfo_and_query_characters_rejected() {
        for domain in ["user@evil.com", "example.com?x", "example.com#top", "example.com\\x"] {
            assert!(
                matches!(validate(&Config::new(domain)), Err(ConfigError::InvalidDomain(_))),
                "accepted {}",
                domain
            );
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::new("example.com")).is_ok());
    }

    #[test]
    fn test_no_variants_rejected() {
        let mut config = Config::new("example.com");
        config.variants.desktop_chrome = false;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_bad_protocol_rejected() {
        let mut config = Config::new("example.com");
        config.crawl.preferred_protocol = "ftp".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_ignore_entries() {
        let mut config = Config::new("example.com");
        config.crawl.ignore = vec![
            "/logout".to_string(),
            "https://www.example.com/admin".to_string(),
        ];
        assert!(validate(&config).is_ok());

        config.crawl.ignore.push("https://other.com/".to_string());
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::new("example.com");
        config.http.request_timeout_secs = Some(0);
        assert!(validate(&config).is_err());
    }
}
