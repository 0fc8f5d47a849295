//! Document store configuration.

use serde::{Deserialize, Serialize};

/// Settings for the document store backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// JSON file the in-memory store is loaded from and flushed to.
    /// `None` keeps the store purely in memory.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
        }
    }
}

fn default_snapshot_path() -> Option<String> {
    Some("data/store.json".to_string())
}
