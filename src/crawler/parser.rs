//! Link extraction from fetched HTML
//!
//! Two extractors share the [`ExtractLinks`] interface:
//! - [`PatternExtractor`] scans the raw text for `href="..."` / `href='...'`
//!   attributes with a regular expression. It does not understand `<base>`,
//!   scripts or malformed markup.
//! - [`HtmlExtractor`] tokenizes the document with a tolerant HTML parser and
//!   reads every `href` attribute, decoding entities on the way.
//!
//! Both only yield references that start with `/` or with the exact root URL.

use crate::config::ExtractorKind;
use crate::url::{LinkPrefix, RawLink};
use crate::MirrorError;
use regex::{CaptureMatches, Regex};
use scraper::{Html, Selector};

/// Produces the same-origin link references found in a document
pub trait ExtractLinks: Send + Sync {
    /// Returns a lazy iterator over the references in `html`
    ///
    /// Calling this again with the same document yields the same sequence.
    fn links<'a>(&'a self, html: &'a str) -> Box<dyn Iterator<Item = RawLink> + 'a>;
}

/// Builds the extractor selected in the configuration
pub fn build_extractor(
    kind: ExtractorKind,
    root_url: &str,
) -> Result<Box<dyn ExtractLinks>, MirrorError> {
    Ok(match kind {
        ExtractorKind::Pattern => Box::new(PatternExtractor::new(root_url)?),
        ExtractorKind::Html => Box::new(HtmlExtractor::new(root_url)),
    })
}

/// Regex-based extractor over the raw document text
#[derive(Debug, Clone)]
pub struct PatternExtractor {
    pattern: Regex,
}

impl PatternExtractor {
    /// Compiles the href pattern for `root_url`
    pub fn new(root_url: &str) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&format!(
            r#"href=['"](/|{})(.*?)['"]"#,
            regex::escape(root_url)
        ))?;
        Ok(Self { pattern })
    }

    /// Iterates over the references in `html` without boxing
    pub fn iter<'r, 'h>(&'r self, html: &'h str) -> Links<'r, 'h> {
        Links {
            captures: self.pattern.captures_iter(html),
        }
    }
}

impl ExtractLinks for PatternExtractor {
    fn links<'a>(&'a self, html: &'a str) -> Box<dyn Iterator<Item = RawLink> + 'a> {
        Box::new(self.iter(html))
    }
}

/// Lazy iterator over pattern matches
pub struct Links<'r, 'h> {
    captures: CaptureMatches<'r, 'h>,
}

impl Iterator for Links<'_, '_> {
    type Item = RawLink;

    fn next(&mut self) -> Option<RawLink> {
        for caps in self.captures.by_ref() {
            // Whole match plus prefix and remainder
            if caps.len() != 3 {
                continue;
            }
            let (Some(prefix), Some(remainder)) = (caps.get(1), caps.get(2)) else {
                continue;
            };

            let prefix = if prefix.as_str() == "/" {
                LinkPrefix::RootRelative
            } else {
                LinkPrefix::Absolute
            };
            return Some(RawLink {
                prefix,
                remainder: remainder.as_str().to_string(),
            });
        }
        None
    }
}

/// Tokenizer-based extractor
#[derive(Debug, Clone)]
pub struct HtmlExtractor {
    root: String,
}

impl HtmlExtractor {
    pub fn new(root_url: &str) -> Self {
        Self {
            root: root_url.to_string(),
        }
    }

    fn collect(&self, html: &str) -> Vec<RawLink> {
        let document = Html::parse_document(html);
        let mut links = Vec::new();

        if let Ok(selector) = Selector::parse("[href]") {
            for element in document.select(&selector) {
                if let Some(href) = element.value().attr("href") {
                    if let Some(link) = RawLink::classify(href, &self.root) {
                        links.push(link);
                    }
                }
            }
        }

        links
    }
}

impl ExtractLinks for HtmlExtractor {
    fn links<'a>(&'a self, html: &'a str) -> Box<dyn Iterator<Item = RawLink> + 'a> {
        // The parsed document cannot outlive this call, so links are gathered eagerly
        Box::new(self.collect(html).into_iter())
    }
}
