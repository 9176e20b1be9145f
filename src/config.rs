use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const CONFIG_FILE: &str = "config.yaml";
pub const DEFAULT_RECORD_KEY: &str = "multi-step-form:v1";
pub const DEFAULT_ROUTE_KEY: &str = "multi-step-form:route";
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Configuration for a wizard session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    /// Storage key holding the saved record
    pub record_key: String,
    /// Storage key holding the current route
    pub route_key: String,
    /// Preview debounce window in milliseconds
    pub debounce_ms: u64,
    /// Simulated latency of the built-in option catalogs
    pub catalog_latency_ms: u64,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            record_key: DEFAULT_RECORD_KEY.to_string(),
            route_key: DEFAULT_ROUTE_KEY.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            catalog_latency_ms: 0,
        }
    }
}

impl WizardConfig {
    /// Load `config.yaml` from the state directory, falling back to
    /// defaults when the file does not exist.
    pub fn load(state_dir: &Path) -> Result<Self> {
        let path = state_dir.join(CONFIG_FILE);
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(serde_yaml::from_str(&raw)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn catalog_latency(&self) -> Duration {
        Duration::from_millis(self.catalog_latency_ms)
    }
}
