//! Crawl variant definitions
//!
//! A variant is a named browser profile. Each enabled variant crawls the site
//! independently and gets its own subtree in the run's output directory.

use std::fmt;

const DESKTOP_CHROME_UA: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                                 AppleWebKit/537.36 (KHTML, like Gecko) \
                                 Chrome/129.0.0.0 Safari/537.36";

const MOBILE_IOS_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 18_1 like Mac OS X) \
                             AppleWebKit/605.1.15 (KHTML, like Gecko) \
                             Version/18.1 Mobile/15E148 Safari/604.1";

const MOBILE_ANDROID_UA: &str = "Mozilla/5.0 (Linux; Android 13; Pixel 7) \
                                 AppleWebKit/537.36 (KHTML, like Gecko) \
                                 Chrome/117.0.0.0 Mobile Safari/537.36";

/// A named fetch profile with its own user agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlVariant {
    /// Chrome on desktop macOS
    Default,

    /// Safari on iPhone
    Ios,

    /// Chrome on Android
    Android,
}

impl CrawlVariant {
    /// The directory name used for this variant's output subtree
    pub fn name(&self) -> &'static str {
        match self {
            Self::Default => "DEFAULT",
            Self::Ios => "IOS",
            Self::Android => "ANDROID",
        }
    }

    /// The `User-Agent` header sent with every request of this variant
    pub fn user_agent(&self) -> &'static str {
        match self {
            Self::Default => DESKTOP_CHROME_UA,
            Self::Ios => MOBILE_IOS_UA,
            Self::Android => MOBILE_ANDROID_UA,
        }
    }

    /// Returns all variants
    pub fn all() -> [Self; 3] {
        [Self::Default, Self::Ios, Self::Android]
    }
}

impl fmt::Display for CrawlVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        assert_eq!(CrawlVariant::Default.name(), "DEFAULT");
        assert_eq!(CrawlVariant::Ios.name(), "IOS");
        assert_eq!(CrawlVariant::Android.name(), "ANDROID");
    }

    #[test]
    fn test_user_agents_are_distinct() {
        let all = CrawlVariant::all();
        for i in 0..all.len() {
            for j in (i + 1)..all.len() {
                assert_ne!(all[i].user_agent(), all[j].user_agent());
            }
        }
    }

    #[test]
    fn test_user_agent_has_no_line_breaks() {
        for variant in CrawlVariant::all() {
            assert!(!variant.user_agent().contains('\n'));
            assert!(variant.user_agent().contains("AppleWebKit/"));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", CrawlVariant::Ios), "IOS");
    }
}
