//! Storage module for persisting crawled documents
//!
//! This module handles:
//! - The `DocumentStore` capability the engine writes through
//! - A filesystem-backed implementation
//! - Creation of the timestamped per-run output directory

mod fs;
mod traits;

pub use fs::FsStore;
pub use traits::DocumentStore;

use chrono::{DateTime, TimeZone};
use std::path::{Path, PathBuf};

/// Returns the output directory for a run started at `started_at`
///
/// The directory name uses unpadded fields, e.g. `data/2024-11-6_14-53-4`.
///
/// # Arguments
///
/// * `output_directory` - Base directory holding all runs
/// * `started_at` - When the run was created
pub fn run_directory<Tz: TimeZone>(output_directory: &Path, started_at: &DateTime<Tz>) -> PathBuf
where
    Tz::Offset: std::fmt::Display,
{
    output_directory.join(started_at.format("%Y-%-m-%-d_%-H-%-M-%-S").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_run_directory_unpadded() {
        let started = Utc.with_ymd_and_hms(2024, 11, 6, 14, 53, 4).unwrap();
        assert_eq!(
            run_directory(Path::new("data"), &started),
            PathBuf::from("data/2024-11-6_14-53-4")
        );
    }

    #[test]
    fn test_run_directory_two_digit_fields() {
        let started = Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 58).unwrap();
        assert_eq!(
            run_directory(Path::new("out"), &started),
            PathBuf::from("out/2025-12-31_23-59-58")
        );
    }
}
