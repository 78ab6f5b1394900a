//! Dataset health check port
//!
//! Lets the readiness check ask whether the observation dataset is reachable
//! without knowing how it is stored.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Health information about the loaded dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetHealth {
    /// Whether the backing storage answered the check
    pub reachable: bool,
    /// Storage engine identifier, e.g. `SQLite 3.46.0` or `in-memory`
    pub backend: Option<String>,
    /// Number of observation rows visible to queries
    pub observation_count: Option<u64>,
    /// Response time of the check in milliseconds
    pub response_time_ms: Option<u64>,
}

impl DatasetHealth {
    /// Create a healthy status for the named backend
    #[must_use]
    pub fn healthy(backend: impl Into<String>) -> Self {
        Self {
            reachable: true,
            backend: Some(backend.into()),
            observation_count: None,
            response_time_ms: None,
        }
    }

    /// Add the observation row count
    #[must_use]
    pub const fn with_observation_count(mut self, count: u64) -> Self {
        self.observation_count = Some(count);
        self
    }

    /// Add response time to the health status
    #[must_use]
    pub const fn with_response_time(mut self, ms: u64) -> Self {
        self.response_time_ms = Some(ms);
        self
    }
}

/// Port for checking the dataset backend
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DatasetHealthPort: Send + Sync {
    /// Check the backend and report its state
    async fn check_health(&self) -> Result<DatasetHealth, ApplicationError>;
}
