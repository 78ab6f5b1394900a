//! Temperature statistics over a set of readings

use serde::{Deserialize, Serialize};

/// Minimum, mean and maximum of a non-empty set of temperature readings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureStats {
    #[serde(rename = "TMIN")]
    pub min: f64,
    #[serde(rename = "TAVG")]
    pub avg: f64,
    #[serde(rename = "TMAX")]
    pub max: f64,
}

impl TemperatureStats {
    /// Compute the statistics in a single pass
    ///
    /// Returns `None` when `readings` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use domain::TemperatureStats;
    ///
    /// let stats = TemperatureStats::from_readings([80.0, 82.0, 79.0]).unwrap();
    /// assert_eq!(stats.min, 79.0);
    /// assert_eq!(stats.max, 82.0);
    /// assert!(TemperatureStats::from_readings(std::iter::empty()).is_none());
    /// ```
    pub fn from_readings<I>(readings: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut count: u64 = 0;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for reading in readings {
            count += 1;
            sum += reading;
            min = min.min(reading);
            max = max.max(reading);
        }

        if count == 0 {
            return None;
        }

        // SAFETY: observation counts are far below 2^52, the f64 mantissa limit
        #[allow(clippy::cast_precision_loss)]
        let avg = sum / count as f64;

        // Rounding in the mean can step just outside the observed range
        Some(Self {
            min,
            avg: avg.clamp(min, max),
            max,
        })
    }
}
