use std::path::PathBuf;
use thiserror::Error;

use crate::models::DataLayout;

/// All errors produced by the gaze fixation pipeline.
#[derive(Error, Debug)]
pub enum GazeError {
    /// A session file name does not follow `DD_KHNNN_fixations.csv`
    /// exactly once.
    #[error("Invalid session file name {name}: {reason}")]
    InvalidFileName { name: String, reason: String },

    /// A required column is missing from a session file header.
    #[error("Missing required column {column} in {path}")]
    Schema { path: PathBuf, column: String },

    /// A feature that was requested has not been implemented.
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// Enumeration found no candidate session files.
    #[error("No session files found in {root} ({layout} layout)")]
    NoDataFound { root: PathBuf, layout: DataLayout },

    /// A cell holds a value that cannot be read as its column's type.
    #[error("Malformed row {line} in {path}: {reason}")]
    MalformedRow {
        path: PathBuf,
        line: u64,
        reason: String,
    },

    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader rejected the file structure.
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the gaze crates.
pub type Result<T> = std::result::Result<T, GazeError>;
