//! Observation entity - One daily reading of a weather station

use serde::{Deserialize, Serialize};

use crate::value_objects::{ObservationDate, StationId};

/// A daily observation recorded by a station
///
/// `(station_id, date)` identifies an observation logically, but the source
/// data does not enforce it. Duplicate rows are kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Station that recorded the reading
    pub station_id: StationId,
    /// Day of the reading
    pub date: ObservationDate,
    /// Precipitation, `None` when not measured that day
    pub precipitation: Option<f64>,
    /// Observed temperature, `None` when not measured that day
    pub temperature: Option<f64>,
}

impl Observation {
    /// Create an observation with no measurements
    #[must_use]
    pub const fn new(station_id: StationId, date: ObservationDate) -> Self {
        Self {
            station_id,
            date,
            precipitation: None,
            temperature: None,
        }
    }

    /// Set the precipitation reading
    #[must_use]
    pub const fn with_precipitation(mut self, precipitation: f64) -> Self {
        self.precipitation = Some(precipitation);
        self
    }

    /// Set the temperature reading
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Project onto the `(date, temperature)` pair
    #[must_use]
    pub const fn temperature_observation(&self) -> TemperatureObservation {
        TemperatureObservation {
            date: self.date,
            temperature: self.temperature,
        }
    }
}

/// A temperature reading of a single day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureObservation {
    pub date: ObservationDate,
    pub temperature: Option<f64>,
}
