//! Logging configuration.

use serde::{Deserialize, Serialize};

use crate::telemetry::LogFormat;

/// Log output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryAppConfig {
    /// `text` for human-readable lines, `json` for structured output
    #[serde(default)]
    pub log_format: LogFormat,

    /// Filter directives, overridden by `RUST_LOG` when set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    "climate_api_server=info,presentation_http=info,application=info,infrastructure=info,tower_http=info"
        .to_string()
}

impl Default for TelemetryAppConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::default(),
            log_filter: default_log_filter(),
        }
    }
}
