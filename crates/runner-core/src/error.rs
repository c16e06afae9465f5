use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the CSV runner crates.
#[derive(Error, Debug)]
pub enum RunnerError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The caller handed over a path that is not a `.csv` file.
    #[error("Please upload a CSV file")]
    NotCsvFile(PathBuf),

    /// The CSV reader could not tokenize the input.
    #[error("{0}")]
    Csv(#[from] csv::Error),

    /// The raw input is not valid UTF-8 text.
    #[error("input is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// A settings document could not be (de)serialized.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the runner crates.
pub type Result<T> = std::result::Result<T, RunnerError>;
