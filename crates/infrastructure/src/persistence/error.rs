//! Shared error mapping for the SQLite persistence layer
//!
//! Keeps driver errors out of the application error text shown to callers;
//! the full error is logged here instead.

use application::error::ApplicationError;
use tracing::error;

/// Map a pool checkout failure to an application-layer error
pub fn map_pool_error(e: &r2d2::Error) -> ApplicationError {
    error!(error = %e, "Failed to get database connection");
    ApplicationError::Storage("dataset connection unavailable".to_string())
}

/// Map a rusqlite error to an application-layer error
pub fn map_sqlite_error(e: &rusqlite::Error) -> ApplicationError {
    error!(error = %e, "Dataset query failed");
    ApplicationError::Storage("dataset query failed".to_string())
}

/// Map a failed blocking task to an application-layer error
pub fn map_join_error(e: &tokio::task::JoinError) -> ApplicationError {
    error!(error = %e, "Dataset query task failed");
    ApplicationError::Internal("dataset query task failed".to_string())
}
