use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::form::location::Location;
use crate::form::lookup::StaticLookup;

pub const DEFAULT_DETECT_DELAY_MS: u64 = 1000;
pub const DEFAULT_SELLER_NAME: &str = "forex011";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Runtime settings. Every field is optional in the YAML file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct AppConfig {
    pub locations: StaticLookup,
    pub current_location: Location,
    pub detect_delay_ms: u64,
    pub seller_name: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            locations: StaticLookup::default(),
            current_location: Location::new("Delhi", "Delhi", "Meera Bagh"),
            detect_delay_ms: DEFAULT_DETECT_DELAY_MS,
            seller_name: DEFAULT_SELLER_NAME.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|source| AppError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Empty documents yield the defaults.
    pub fn from_yaml(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn detect_delay(&self) -> Duration {
        Duration::from_millis(self.detect_delay_ms)
    }
}
