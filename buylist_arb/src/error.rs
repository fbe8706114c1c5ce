//! Error types for buylist_arb

use mtg_common::RulesError;
use thiserror::Error;

/// Unified error type for buylist_arb operations
#[derive(Debug, Error)]
pub enum ArbError {
    /// File I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// CSV reading or writing failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// Config file could not be parsed
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
    /// Config file parsed but is unusable
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    /// Naming rule tables failed to load
    #[error("Rule tables error: {0}")]
    Rules(#[from] RulesError),
    /// Input file does not look like a buylist export
    #[error("Malformed input file: {0}")]
    MalformedInput(String),
    /// HTTP request failed (network error, timeout, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// Non-success HTTP status, with the response body
    #[error("HTTP error {status}: {body}")]
    HttpStatus {
        status: reqwest::StatusCode,
        body: String,
    },
    /// Price response is not the expected XML document
    #[error("Failed to decode price response: {0}")]
    Xml(#[from] quick_xml::de::DeError),
    /// Writing a result row failed
    #[error("Failed to write result: {0}")]
    Sink(String),
    /// A worker task panicked or was cancelled
    #[error("Worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

/// Result alias for buylist_arb operations
pub type Result<T> = std::result::Result<T, ArbError>;
