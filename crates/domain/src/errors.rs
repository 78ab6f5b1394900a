//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Date text is not a canonical `YYYY-MM-DD` calendar date
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Station identifier is empty or blank
    #[error("Invalid station id: {0:?}")]
    InvalidStationId(String),
}

impl DomainError {
    /// Create an invalid date error
    pub fn invalid_date(input: impl Into<String>) -> Self {
        Self::InvalidDate(input.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_date_error_message() {
        let err = DomainError::invalid_date("2017-13-01");
        assert_eq!(err.to_string(), "Invalid date: 2017-13-01");
    }

    #[test]
    fn invalid_station_id_error_message() {
        let err = DomainError::InvalidStationId("  ".to_string());
        assert_eq!(err.to_string(), "Invalid station id: \"  \"");
    }
}
