//! Error types for dataset and golden standard loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading job inputs.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Dataset or golden standard file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Parsing Errors ===
    /// Failed to parse CSV header.
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// CSV file has no header row.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// Golden standard is not valid JSON of the expected shape.
    #[error("invalid golden standard {path}: {source}")]
    GoldenStandardParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A correspondence in the golden standard has an empty table or column.
    #[error("invalid golden standard entry {index} in {path}: {source}")]
    GoldenStandardEntry {
        path: PathBuf,
        index: usize,
        #[source]
        source: schemabench_model::ModelError,
    },

    // === Registry Errors ===
    /// No loader registered under this name.
    #[error("unknown loader '{name}' (known: {known})")]
    UnknownLoader { name: String, known: String },

    /// Loader arguments do not match the loader's parameters.
    #[error("invalid arguments for loader '{loader}': {source}")]
    InvalidArgs {
        loader: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for loading operations.
pub type Result<T> = std::result::Result<T, IngestError>;
