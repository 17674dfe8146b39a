//! Configuration for the settlement engine

use crate::types::PlanMode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settlement engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Service name
    pub service_name: String,

    /// Service version
    pub service_version: String,

    /// Snapshot document the ledger loads from and saves to
    pub ledger_file: PathBuf,

    /// Plan mode used when the caller does not pick one
    pub default_mode: PlanMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_name: "divvy-settlement".to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            ledger_file: PathBuf::from("./data/ledger.json"),
            default_mode: PlanMode::Simplified,
        }
    }
}

impl Config {
    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Config::default();

        if let Ok(path) = std::env::var("DIVVY_LEDGER_FILE") {
            config.ledger_file = PathBuf::from(path);
        }

        if let Ok(mode) = std::env::var("DIVVY_PLAN_MODE") {
            config.default_mode = PlanMode::parse(&mode)
                .ok_or_else(|| crate::Error::Config(format!("unknown plan mode: {}", mode)))?;
        }

        Ok(config)
    }
}
