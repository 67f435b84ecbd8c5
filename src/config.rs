//! Configuration System
//!
//! Layered configuration for the reset tool: compiled-in defaults, an optional
//! global file, an optional `demo-reset.toml` next to the operator, environment
//! overrides, and finally CLI flags. The result is one `ResetConfig` value built
//! at process start and passed into the workflow.

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use merge::merge_policy::{DEFAULT_COLLECTIONS, DEFAULT_TIMEOUT_SECS};
pub use sources::environment::ENV_PREFIX;
pub use sources::local_file::LOCAL_CONFIG_FILE;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResetConfig {
    /// Remote store settings
    #[serde(default)]
    pub store: StoreConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Database root, e.g. `https://<project>.firebasedatabase.app`
    #[serde(default)]
    pub base_url: Option<String>,

    /// Collections cleared by a reset, in display and processing order
    #[serde(default = "default_collections")]
    pub collections: Vec<String>,

    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_collections() -> Vec<String> {
    DEFAULT_COLLECTIONS.iter().map(|s| s.to_string()).collect()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            collections: default_collections(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_timeout_secs(),
        }
    }
}

impl StoreConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Validate store configuration, collecting every problem.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        match self.base_url.as_deref().map(str::trim) {
            None | Some("") => errors.push(format!(
                "Database URL is not set (use --database-url, {}__STORE__BASE_URL, or store.base_url)",
                ENV_PREFIX
            )),
            Some(url) if !url.starts_with("http://") && !url.starts_with("https://") => {
                errors.push(format!("Database URL must start with http:// or https://: {}", url))
            }
            Some(_) => {}
        }

        if self.collections.is_empty() {
            errors.push("At least one collection must be configured".to_string());
        }
        let mut seen = HashSet::new();
        for name in &self.collections {
            if name.trim().is_empty() {
                errors.push("Collection names cannot be empty".to_string());
            } else if !seen.insert(name.as_str()) {
                errors.push(format!("Duplicate collection '{}'", name));
            }
        }

        if self.timeout_secs == 0 {
            errors.push("store.timeout_secs must be greater than zero".to_string());
        }
        if self.connect_timeout_secs == 0 {
            errors.push("store.connect_timeout_secs must be greater than zero".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl ResetConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<String>> {
        self.store.validate()
    }
}
