//! CardShark credentials and fixed run parameters

use crate::error::{ArbError, Result};
use serde::Deserialize;
use std::path::Path;

/// Default config file, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "cfg.json";

/// Number of entries processed in parallel
pub const MAX_CONCURRENCY: usize = 8;

/// Highest market/buylist price ratio still counted as an opportunity
pub const TOLERANCE: f64 = 0.75;

/// Buylist prices below this are not worth a lookup
pub const THRESHOLD: f64 = 0.1;

/// Secrets needed to call the CardShark API
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api_key: String,
    pub user_name: String,
}

impl Config {
    /// Load the config from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;

        if config.api_key.trim().is_empty() {
            return Err(ArbError::InvalidConfig("api_key is empty".to_string()));
        }
        if config.user_name.trim().is_empty() {
            return Err(ArbError::InvalidConfig("user_name is empty".to_string()));
        }

        Ok(config)
    }
}
