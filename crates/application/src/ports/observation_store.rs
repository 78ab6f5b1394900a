//! Observation store port
//!
//! Defines the read-only interface over the loaded climate dataset.

use std::collections::HashMap;

use async_trait::async_trait;
use domain::{Observation, ObservationDate, StationId};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for reading the immutable observation dataset
///
/// Sequences come back in the store's enumeration order. Implementations must
/// keep that order stable for an unchanged dataset, because last-write-wins
/// collapsing and tie-breaks downstream depend on it.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ObservationStore: Send + Sync {
    /// Latest observation date, `None` when there are no observations
    async fn max_date(&self) -> Result<Option<ObservationDate>, ApplicationError>;

    /// All observations dated on or after `cutoff`
    async fn observations_since(
        &self,
        cutoff: ObservationDate,
    ) -> Result<Vec<Observation>, ApplicationError>;

    /// All observations dated on or after `start` and, if given, on or before `end`
    async fn observations_in_range(
        &self,
        start: ObservationDate,
        end: Option<ObservationDate>,
    ) -> Result<Vec<Observation>, ApplicationError>;

    /// Every station of the reference list, in storage order
    async fn station_ids(&self) -> Result<Vec<StationId>, ApplicationError>;

    /// Number of observation rows per station, including rows without readings
    async fn observation_counts_by_station(
        &self,
    ) -> Result<HashMap<StationId, u64>, ApplicationError>;

    /// Observations of one station dated on or after `cutoff`
    async fn observations_for_station_since(
        &self,
        station: &StationId,
        cutoff: ObservationDate,
    ) -> Result<Vec<Observation>, ApplicationError> {
        let mut observations = self.observations_since(cutoff).await?;
        observations.retain(|obs| &obs.station_id == station);
        Ok(observations)
    }
}
