//! SQLite dataset health adapter
//!
//! Implements the `DatasetHealthPort` for the SQLite dataset using the connection pool.

use std::{sync::Arc, time::Instant};

use application::{
    error::ApplicationError,
    ports::{DatasetHealth, DatasetHealthPort},
};
use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use super::{
    ConnectionPool,
    error::{map_join_error, map_pool_error, map_sqlite_error},
};

/// SQLite dataset health adapter
pub struct SqliteDatasetHealth {
    pool: Arc<ConnectionPool>,
}

impl std::fmt::Debug for SqliteDatasetHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteDatasetHealth")
            .field("pool", &"<ConnectionPool>")
            .finish()
    }
}

impl SqliteDatasetHealth {
    /// Create a new dataset health adapter with the given connection pool
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DatasetHealthPort for SqliteDatasetHealth {
    #[instrument(skip(self))]
    async fn check_health(&self) -> Result<DatasetHealth, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let start = Instant::now();

        let result = tokio::task::spawn_blocking(move || {
            let conn = pool.get().map_err(|e| map_pool_error(&e))?;

            let version: String = conn
                .query_row("SELECT sqlite_version()", [], |row| row.get(0))
                .unwrap_or_else(|_| "unknown".to_string());

            let count: i64 = conn
                .query_row("SELECT COUNT(*) FROM measurement", [], |row| row.get(0))
                .map_err(|e| map_sqlite_error(&e))?;

            Ok::<_, ApplicationError>((version, u64::try_from(count).unwrap_or_default()))
        })
        .await
        .map_err(|e| map_join_error(&e))?;

        match result {
            Ok((version, observation_count)) => {
                // Probe time is bounded by the request timeout, far below u64::MAX ms
                #[allow(clippy::cast_possible_truncation)]
                let response_time_ms = start.elapsed().as_millis() as u64;

                debug!(
                    version = %version,
                    observation_count,
                    response_time_ms,
                    "Dataset health check passed"
                );

                Ok(DatasetHealth::healthy(format!("SQLite {version}"))
                    .with_observation_count(observation_count)
                    .with_response_time(response_time_ms))
            },
            Err(e) => {
                warn!(error = %e, "Dataset health check failed");
                Err(e)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        persistence::create_pool,
        testing::{memory_config, scenario_pool},
    };

    #[tokio::test]
    async fn check_health_reports_version_and_count() {
        let health = SqliteDatasetHealth::new(scenario_pool());

        let status = health.check_health().await.unwrap();

        assert!(status.reachable);
        assert!(status.backend.unwrap().starts_with("SQLite "));
        assert_eq!(status.observation_count, Some(6));
        assert!(status.response_time_ms.is_some());
    }

    #[tokio::test]
    async fn check_health_fails_without_measurement_table() {
        let pool = Arc::new(create_pool(&memory_config()).unwrap());
        let health = SqliteDatasetHealth::new(pool);

        let err = health.check_health().await.unwrap_err();
        assert!(matches!(err, ApplicationError::Storage(_)));
    }

    #[test]
    fn debug_hides_pool() {
        let health = SqliteDatasetHealth::new(scenario_pool());
        let debug_str = format!("{health:?}");
        assert!(debug_str.contains("SqliteDatasetHealth"));
        assert!(debug_str.contains("<ConnectionPool>"));
    }
}
