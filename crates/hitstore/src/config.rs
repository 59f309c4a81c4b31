//! Store configuration.
//!
//! [`StoreConfig`] can be built in code or parsed from YAML:
//!
//! ```
//! use hitstore::StoreConfig;
//!
//! let config = StoreConfig::from_yaml("path: /var/lib/hits.json\nsave_on_close: false\n").unwrap();
//! assert!(!config.save_on_close);
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Where and how a store persists itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Backing file. `None` keeps the store in memory only.
    pub path: Option<PathBuf>,
    /// Save pending changes when the store is closed.
    pub save_on_close: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            path: None,
            save_on_close: true,
        }
    }
}

impl StoreConfig {
    /// Configuration for a store backed by the file at `path`.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            path: Some(path.into()),
            ..StoreConfig::default()
        }
    }

    /// Parses a configuration from YAML. Missing keys take their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Enables or disables saving on close.
    pub fn save_on_close(mut self, enabled: bool) -> Self {
        self.save_on_close = enabled;
        self
    }
}
