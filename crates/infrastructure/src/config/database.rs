//! Dataset (SQLite) configuration.

use serde::{Deserialize, Serialize};

/// SQLite dataset configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite dataset (`:memory:` for an empty in-memory database)
    #[serde(default = "default_db_path")]
    pub path: String,

    /// Maximum number of pooled read connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Copy the whole dataset into memory at startup and serve from there
    #[serde(default)]
    pub preload: bool,
}

fn default_db_path() -> String {
    "Resources/hawaii.sqlite".to_string()
}

const fn default_max_connections() -> u32 {
    4
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
            preload: false,
        }
    }
}
