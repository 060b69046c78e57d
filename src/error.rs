//! Error types for loading complexity reports

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a report
#[derive(Error, Debug)]
pub enum ProfilerError {
    #[error("Report not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Invalid entry #{index} for '{file}' in {}: {message}", path.display())]
    InvalidEntry {
        path: PathBuf,
        file: String,
        index: usize,
        message: String,
    },

    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ProfilerError>;
