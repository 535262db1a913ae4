use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SitemapError {
    #[error("Failed to list game directory {path}: {source}")]
    ListGames { path: PathBuf, source: io::Error },
    #[error("Failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("Failed to read config {path}: {source}")]
    ReadConfig { path: PathBuf, source: io::Error },
    #[error("Invalid config {path}: {source}")]
    ParseConfig {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid --lastmod date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("Priority {0} is outside 0.0..=1.0")]
    InvalidPriority(f64),
    #[error("Unable to determine the current directory: {0}")]
    CurrentDir(io::Error),
}
