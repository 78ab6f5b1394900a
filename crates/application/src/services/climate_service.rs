//! Climate query service
//!
//! Turns the route semantics of the API (last-year windows, the most active
//! station, temperature statistics over a date range) into computations over
//! what the observation store returns.

use std::collections::BTreeMap;
use std::sync::Arc;

use domain::{ObservationDate, StationId, TemperatureObservation, TemperatureStats};
use tracing::{debug, instrument};

use crate::error::ApplicationError;
use crate::ports::ObservationStore;

/// Service answering the aggregate climate queries
pub struct ClimateService {
    store: Arc<dyn ObservationStore>,
}

impl std::fmt::Debug for ClimateService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClimateService")
            .field("store", &"<ObservationStore>")
            .finish()
    }
}

impl ClimateService {
    /// Create a new service over the given store
    #[must_use]
    pub fn new(store: Arc<dyn ObservationStore>) -> Self {
        Self { store }
    }

    /// Latest date present in the dataset
    #[instrument(skip(self))]
    pub async fn max_date(&self) -> Result<ObservationDate, ApplicationError> {
        self.store.max_date().await?.ok_or_else(|| {
            ApplicationError::EmptyDataset("no observations have been recorded".to_string())
        })
    }

    /// The latest date minus one calendar year
    #[instrument(skip(self))]
    pub async fn last_year_cutoff(&self) -> Result<ObservationDate, ApplicationError> {
        let latest = self.max_date().await?;
        let cutoff = latest.one_year_earlier()?;
        debug!(latest = %latest, cutoff = %cutoff, "Computed last-year cutoff");
        Ok(cutoff)
    }

    /// Precipitation per date over the last year of data
    ///
    /// Readings of several stations (or duplicate rows) on the same date
    /// collapse onto one key: the one enumerated last by the store wins.
    #[instrument(skip(self))]
    pub async fn precipitation_last_year(
        &self,
    ) -> Result<BTreeMap<ObservationDate, Option<f64>>, ApplicationError> {
        let cutoff = self.last_year_cutoff().await?;
        let observations = self.store.observations_since(cutoff).await?;
        let rows = observations.len();

        let mut by_date = BTreeMap::new();
        for observation in observations {
            by_date.insert(observation.date, observation.precipitation);
        }

        debug!(rows, dates = by_date.len(), "Collapsed precipitation by date");
        Ok(by_date)
    }

    /// Every station of the reference list
    #[instrument(skip(self))]
    pub async fn all_station_ids(&self) -> Result<Vec<StationId>, ApplicationError> {
        let stations = self.store.station_ids().await?;
        debug!(count = stations.len(), "Listed stations");
        Ok(stations)
    }

    /// Station with the most observation rows
    ///
    /// Only stations of the reference list are candidates. On a tie the one
    /// listed first by [`Self::all_station_ids`] wins.
    #[instrument(skip(self))]
    pub async fn most_active_station(&self) -> Result<StationId, ApplicationError> {
        let counts = self.store.observation_counts_by_station().await?;
        let stations = self.all_station_ids().await?;

        let mut best: Option<(StationId, u64)> = None;
        for station in stations {
            let count = counts.get(&station).copied().unwrap_or(0);
            let leads = best.as_ref().map_or(count > 0, |(_, top)| count > *top);
            if leads {
                best = Some((station, count));
            }
        }

        let (station, count) = best.ok_or_else(|| {
            ApplicationError::EmptyDataset("no station has any observations".to_string())
        })?;
        debug!(station = %station, count, "Selected most active station");
        Ok(station)
    }

    /// Temperature readings of one station on or after `cutoff`
    ///
    /// Returned in store enumeration order, not sorted by date.
    #[instrument(skip(self))]
    pub async fn temperature_observations_for_station(
        &self,
        station: &StationId,
        cutoff: ObservationDate,
    ) -> Result<Vec<TemperatureObservation>, ApplicationError> {
        let observations = self
            .store
            .observations_for_station_since(station, cutoff)
            .await?;

        Ok(observations
            .iter()
            .map(domain::Observation::temperature_observation)
            .collect())
    }

    /// Last year of temperature readings of the most active station
    #[instrument(skip(self))]
    pub async fn most_active_station_temperatures(
        &self,
    ) -> Result<Vec<TemperatureObservation>, ApplicationError> {
        let station = self.most_active_station().await?;
        let cutoff = self.last_year_cutoff().await?;
        self.temperature_observations_for_station(&station, cutoff)
            .await
    }

    /// Minimum, mean and maximum temperature between `start` and `end`
    ///
    /// `end` is inclusive; without it the range is open-ended. Observations
    /// lacking a temperature are ignored.
    #[instrument(skip(self))]
    pub async fn temperature_stats(
        &self,
        start: ObservationDate,
        end: Option<ObservationDate>,
    ) -> Result<TemperatureStats, ApplicationError> {
        let observations = self.store.observations_in_range(start, end).await?;

        let stats =
            TemperatureStats::from_readings(observations.iter().filter_map(|o| o.temperature))
                .ok_or_else(|| {
                    let range = end.map_or_else(
                        || format!("{start} onwards"),
                        |end| format!("{start} to {end}"),
                    );
                    ApplicationError::NoDataInRange(format!(
                        "no temperature observations from {range}"
                    ))
                })?;

        debug!(
            rows = observations.len(),
            min = stats.min,
            avg = stats.avg,
            max = stats.max,
            "Computed temperature statistics"
        );
        Ok(stats)
    }
}
