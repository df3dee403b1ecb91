use crate::MirrorError;
use std::fmt;
use url::Url;

/// An absolute URL on the crawl's origin
///
/// Values are only produced by [`Canonicalizer`], so every one of them starts
/// with the run's root URL and shares its scheme and host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalUrl(String);

impl CanonicalUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CanonicalUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which of the two accepted forms a link reference took
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkPrefix {
    /// The reference started with `/`
    RootRelative,
    /// The reference started with the full root URL
    Absolute,
}

/// A link reference split into its matched prefix and the rest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLink {
    pub prefix: LinkPrefix,
    pub remainder: String,
}

impl RawLink {
    pub fn root_relative(remainder: impl Into<String>) -> Self {
        Self {
            prefix: LinkPrefix::RootRelative,
            remainder: remainder.into(),
        }
    }

    pub fn absolute(remainder: impl Into<String>) -> Self {
        Self {
            prefix: LinkPrefix::Absolute,
            remainder: remainder.into(),
        }
    }

    /// Splits an href value against `root`
    ///
    /// Returns None for anything that is neither root-relative nor starts with
    /// the root URL verbatim (other origins, relative paths, `mailto:` ...).
    pub fn classify(href: &str, root: &str) -> Option<Self> {
        if let Some(rest) = href.strip_prefix('/') {
            Some(Self::root_relative(rest))
        } else {
            href.strip_prefix(root).map(Self::absolute)
        }
    }
}

/// Resolves link references against a fixed root URL
#[derive(Debug, Clone)]
pub struct Canonicalizer {
    root: String,
}

impl Canonicalizer {
    /// Creates a canonicalizer for `root_url`
    ///
    /// The root must be an absolute URL with a host and must end in `/`, so
    /// that appending a remainder always lands on the same origin.
    pub fn new(root_url: &str) -> Result<Self, MirrorError> {
        let parsed = Url::parse(root_url)?;
        if parsed.host_str().is_none() {
            return Err(MirrorError::UrlParse(url::ParseError::EmptyHost));
        }

        let mut root = root_url.to_string();
        if !root.ends_with('/') {
            root.push('/');
        }
        Ok(Self { root })
    }

    /// The root URL as a string, always ending in `/`
    pub fn root_str(&self) -> &str {
        &self.root
    }

    /// The root URL itself as a canonical URL
    pub fn root(&self) -> CanonicalUrl {
        CanonicalUrl(self.root.clone())
    }

    /// Produces the canonical URL for an extracted link
    ///
    /// Both prefixes resolve to `root + remainder`; the leading `/` of a
    /// root-relative reference overlaps with the root's trailing slash.
    pub fn canonicalize(&self, link: &RawLink) -> CanonicalUrl {
        CanonicalUrl(format!("{}{}", self.root, link.remainder))
    }

    /// Canonicalizes a free-form reference, or None if it is not same-origin
    pub fn resolve(&self, reference: &str) -> Option<CanonicalUrl> {
        RawLink::classify(reference, &self.root).map(|link| self.canonicalize(&link))
    }
}
