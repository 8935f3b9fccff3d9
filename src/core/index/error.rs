//! Index Error Types
//!
//! Error handling for lexicon construction and override ingestion.

use thiserror::Error;

/// Lexicon build / override ingestion errors.
#[derive(Error, Debug)]
pub enum IndexError {
    /// No override sheet could be fetched at all. Non-fatal: the
    /// builder degrades to a derived-tokens-only lexicon.
    #[error("override data source unavailable: {0}")]
    DataSource(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for index operations.
pub type Result<T> = std::result::Result<T, IndexError>;
