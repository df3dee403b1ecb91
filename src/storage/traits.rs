//! Storage traits
//!
//! This module defines the filesystem capability the crawl engine persists
//! documents through.

use std::io;
use std::path::Path;

/// Trait for document storage backends
///
/// Both operations either succeed or return an I/O error; the engine treats
/// any error as fatal for the run and does not retry.
pub trait DocumentStore {
    /// Creates `path` and all of its missing parents
    fn ensure_directory(&self, path: &Path) -> io::Result<()>;

    /// Writes `bytes` to `path`, replacing any existing file
    fn write_file(&self, path: &Path, bytes: &[u8]) -> io::Result<()>;

    /// Ensures the parent directory of `path` exists, then writes the file
    fn persist(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            self.ensure_directory(parent)?;
        }
        self.write_file(path, bytes)
    }
}

impl<T: DocumentStore + ?Sized> DocumentStore for &T {
    fn ensure_directory(&self, path: &Path) -> io::Result<()> {
        (**self).ensure_directory(path)
    }

    fn write_file(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        (**self).write_file(path, bytes)
    }
}
