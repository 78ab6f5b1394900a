//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `database`: location and pooling of the SQLite dataset
//! - `telemetry`: log format and filter
//!
//! Values are layered: built-in defaults, then a config file, then
//! `CLIMATE_API__*` environment variables (e.g. `CLIMATE_API__SERVER__PORT=8080`).
//! The file is `config.toml` when present, or the path named by
//! `CLIMATE_API_CONFIG`, which must exist.

mod database;
mod server;
mod telemetry;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use database::DatabaseConfig;
pub use server::ServerConfig;
pub use telemetry::TelemetryAppConfig;

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Environment variable prefix
const ENV_PREFIX: &str = "CLIMATE_API";

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "CLIMATE_API_CONFIG";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Dataset storage configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryAppConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (if present) and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::build(config::File::with_name("config").required(false))
    }

    /// Load configuration from an explicit file plus the environment
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
        Self::build(config::File::from(path.as_ref()).required(true))
    }

    fn build<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Socket address string the server binds to
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::telemetry::LogFormat;

    #[test]
    fn defaults_are_sensible() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert!(!config.server.expose_internal_errors);
        assert_eq!(config.database.path, "Resources/hawaii.sqlite");
        assert!(!config.database.preload);
        assert_eq!(config.telemetry.log_format, LogFormat::Text);
    }

    #[test]
    fn bind_address_joins_host_and_port() {
        let mut config = AppConfig::default();
        config.server.host = "0.0.0.0".to_string();
        config.server.port = 5000;
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
    }

    #[test]
    fn load_from_file_overrides_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            r#"
[server]
port = 8080

[database]
path = "/data/weather.sqlite"
preload = true

[telemetry]
log_format = "json"
"#
        )
        .unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.database.path, "/data/weather.sqlite");
        assert!(config.database.preload);
        assert_eq!(config.database.max_connections, 4);
        assert_eq!(config.telemetry.log_format, LogFormat::Json);
    }

    #[test]
    fn config_path_variable_is_not_a_setting() {
        assert!(!CONFIG_PATH_ENV.starts_with(&format!("{ENV_PREFIX}__")));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = AppConfig::load_from("/nonexistent/climate-api.toml");
        assert!(result.is_err());
    }
}
