//! Configuration and data directory management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// File name of the works table inside the data directory.
pub const WORKS_FILE: &str = "goodreads_works.csv";
/// File name of the (optional) reviews table inside the data directory.
pub const REVIEWS_FILE: &str = "goodreads_reviews.csv";
/// Suggested file name for an exported reading list.
pub const EXPORT_FILE_NAME: &str = "my_summer_reading_list.csv";

pub const DEFAULT_PORT: u16 = 3004;
pub const DEFAULT_RESULT_COUNT: usize = 5;
pub const MAX_RESULT_COUNT: usize = 20;

/// Paths to all BookVoyage data files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPaths {
    /// Root data directory (e.g., `Data/`).
    pub root: PathBuf,
    /// Works table (`Data/goodreads_works.csv`).
    pub works_file: PathBuf,
    /// Reviews table (`Data/goodreads_reviews.csv`). May not exist.
    pub reviews_file: PathBuf,
    /// Saved reading lists (`Data/exports/`).
    pub exports: PathBuf,
}

impl DataPaths {
    /// Create data paths from a root directory. Creates directories if needed.
    pub fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        let paths = Self {
            works_file: root.join(WORKS_FILE),
            reviews_file: root.join(REVIEWS_FILE),
            exports: root.join("exports"),
            root,
        };
        std::fs::create_dir_all(&paths.exports)?;
        Ok(paths)
    }

    /// Whether the reviews table is present on disk.
    pub fn has_reviews(&self) -> bool {
        self.reviews_file.is_file()
    }
}

/// Top-level BookVoyage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookVoyageConfig {
    /// HTTP server port.
    pub port: u16,
    /// Data file paths.
    pub data_paths: DataPaths,
    /// Result count used when a request does not name one.
    pub default_result_count: usize,
}

impl BookVoyageConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env(data_dir: impl AsRef<Path>) -> Result<Self> {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let default_result_count = match std::env::var("BOOKVOYAGE_DEFAULT_COUNT") {
            Ok(raw) => parse_result_count(&raw)?,
            Err(_) => DEFAULT_RESULT_COUNT,
        };

        let data_paths = DataPaths::new(data_dir)?;

        Ok(Self {
            port,
            data_paths,
            default_result_count,
        })
    }
}

fn parse_result_count(raw: &str) -> Result<usize> {
    let count: usize = raw
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("BOOKVOYAGE_DEFAULT_COUNT is not a number: {raw}")))?;
    if !(1..=MAX_RESULT_COUNT).contains(&count) {
        return Err(Error::Config(format!(
            "BOOKVOYAGE_DEFAULT_COUNT must be between 1 and {MAX_RESULT_COUNT}, got {count}"
        )));
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_paths_layout() {
        let dir = tempfile::tempdir().unwrap();
        let paths = DataPaths::new(dir.path()).unwrap();
        assert_eq!(paths.works_file, dir.path().join("goodreads_works.csv"));
        assert_eq!(paths.reviews_file, dir.path().join("goodreads_reviews.csv"));
        assert!(paths.exports.is_dir());
        assert!(!paths.has_reviews());

        std::fs::write(&paths.reviews_file, "work_id,rating,review_text\n").unwrap();
        assert!(paths.has_reviews());
    }

    #[test]
    fn test_parse_result_count_bounds() {
        assert_eq!(parse_result_count("7").unwrap(), 7);
        assert_eq!(parse_result_count(" 20 ").unwrap(), 20);
        assert!(matches!(parse_result_count("0"), Err(Error::Config(_))));
        assert!(matches!(parse_result_count("21"), Err(Error::Config(_))));
        assert!(matches!(parse_result_count("five"), Err(Error::Config(_))));
    }
}
