//! Infrastructure layer - Adapters for external systems
//!
//! Implements the ports defined in the application layer:
//! SQLite and in-memory observation stores, configuration loading,
//! and log initialisation.

pub mod config;
pub mod persistence;
pub mod telemetry;
#[cfg(test)]
pub mod testing;

pub use config::{AppConfig, CONFIG_PATH_ENV, DatabaseConfig, ServerConfig, TelemetryAppConfig};
pub use persistence::{
    ConnectionPool, DatabaseError, InMemoryObservationStore, SqliteDatasetHealth,
    SqliteObservationStore, create_pool,
};
pub use telemetry::{LogFormat, TelemetryError, init_tracing};
