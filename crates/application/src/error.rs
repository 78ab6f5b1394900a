//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The dataset holds no observations or stations
    #[error("Empty dataset: {0}")]
    EmptyDataset(String),

    /// The query was valid but nothing matched after filtering
    #[error("No data in range: {0}")]
    NoDataInRange(String),

    /// The observation store could not be read
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
