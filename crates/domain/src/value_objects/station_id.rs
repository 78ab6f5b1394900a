//! Weather station identifier value object

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Identifier of a weather station (e.g. `USC00519281`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StationId(String);

impl StationId {
    /// Create a station ID, rejecting empty or blank identifiers
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::InvalidStationId(id));
        }
        Ok(Self(id))
    }

    /// Get the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for StationId {
    type Error = DomainError;

    fn try_from(id: String) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl From<StationId> for String {
    fn from(id: StationId) -> Self {
        id.0
    }
}

impl AsRef<str> for StationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn station_id_keeps_text() {
        let id = StationId::new("USC00519281").unwrap();
        assert_eq!(id.as_str(), "USC00519281");
        assert_eq!(id.to_string(), "USC00519281");
    }

    #[test]
    fn blank_station_id_is_rejected() {
        assert!(StationId::new("").is_err());
        assert!(StationId::new("   ").is_err());
    }

    #[test]
    fn station_id_serializes_transparently() {
        let id = StationId::new("S1").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"S1\"");
    }

    #[test]
    fn deserialization_validates_id() {
        let ok: StationId = serde_json::from_str("\"USC00519281\"").unwrap();
        assert_eq!(ok.as_str(), "USC00519281");

        let blank: Result<StationId, _> = serde_json::from_str("\"   \"");
        assert!(blank.is_err());
    }
}
