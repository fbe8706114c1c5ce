//! Error types for mtg_common

use thiserror::Error;

/// Errors raised while loading the naming rule tables
#[derive(Debug, Error)]
pub enum RulesError {
    /// Rule document is not valid JSON or does not match the table layout
    #[error("Failed to parse rule tables: {0}")]
    Parse(#[from] serde_json::Error),
    /// A table entry the engine cannot work with
    #[error("Invalid entry in rule table '{table}': {detail}")]
    InvalidEntry { table: &'static str, detail: String },
}

/// Result alias for rule table operations
pub type Result<T> = std::result::Result<T, RulesError>;
