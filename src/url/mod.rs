//! URL handling module for Mirrorline
//!
//! This module resolves extracted link references into canonical same-origin
//! URLs and maps canonical URLs onto local storage paths.

mod canonicalize;
mod path_map;

// Re-export main types and functions
pub use canonicalize::{CanonicalUrl, Canonicalizer, LinkPrefix, RawLink};
pub use path_map::map_path;
