//! In-memory observation store
//!
//! Holds an immutable copy of the dataset. Used by tests and as the preloaded
//! snapshot when `database.preload` is enabled.

use std::{collections::HashMap, sync::Arc};

use application::{
    error::ApplicationError,
    ports::{DatasetHealth, DatasetHealthPort, ObservationStore},
};
use async_trait::async_trait;
use domain::{Observation, ObservationDate, StationId};
use tracing::{debug, instrument};

#[derive(Debug, Clone)]
struct Dataset {
    stations: Vec<StationId>,
    observations: Vec<Observation>,
    counts: HashMap<StationId, u64>,
}

/// Immutable in-memory observation store
///
/// Cloning shares the underlying data.
#[derive(Debug, Clone)]
pub struct InMemoryObservationStore {
    dataset: Arc<Dataset>,
}

impl InMemoryObservationStore {
    /// Create a store from a station list and observations in enumeration order
    #[must_use]
    pub fn new(stations: Vec<StationId>, observations: Vec<Observation>) -> Self {
        let mut counts = HashMap::new();
        for observation in &observations {
            *counts.entry(observation.station_id.clone()).or_insert(0) += 1;
        }

        Self {
            dataset: Arc::new(Dataset {
                stations,
                observations,
                counts,
            }),
        }
    }

    /// Replace the per-station row counts
    ///
    /// A snapshot keeps the source's counts, which may include rows that were
    /// dropped for a malformed date.
    #[must_use]
    pub fn with_observation_counts(self, counts: HashMap<StationId, u64>) -> Self {
        let Dataset {
            stations,
            observations,
            ..
        } = Arc::unwrap_or_clone(self.dataset);

        Self {
            dataset: Arc::new(Dataset {
                stations,
                observations,
                counts,
            }),
        }
    }

    /// Number of observations held
    #[must_use]
    pub fn len(&self) -> usize {
        self.dataset.observations.len()
    }

    /// Whether the store holds no observations
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dataset.observations.is_empty()
    }

    fn filtered(&self, keep: impl Fn(&Observation) -> bool) -> Vec<Observation> {
        self.dataset
            .observations
            .iter()
            .filter(|obs| keep(obs))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ObservationStore for InMemoryObservationStore {
    async fn max_date(&self) -> Result<Option<ObservationDate>, ApplicationError> {
        Ok(self.dataset.observations.iter().map(|obs| obs.date).max())
    }

    #[instrument(skip(self))]
    async fn observations_since(
        &self,
        cutoff: ObservationDate,
    ) -> Result<Vec<Observation>, ApplicationError> {
        Ok(self.filtered(|obs| obs.date >= cutoff))
    }

    #[instrument(skip(self))]
    async fn observations_in_range(
        &self,
        start: ObservationDate,
        end: Option<ObservationDate>,
    ) -> Result<Vec<Observation>, ApplicationError> {
        Ok(self.filtered(|obs| obs.date >= start && end.is_none_or(|end| obs.date <= end)))
    }

    async fn station_ids(&self) -> Result<Vec<StationId>, ApplicationError> {
        Ok(self.dataset.stations.clone())
    }

    async fn observation_counts_by_station(
        &self,
    ) -> Result<HashMap<StationId, u64>, ApplicationError> {
        Ok(self.dataset.counts.clone())
    }
}

#[async_trait]
impl DatasetHealthPort for InMemoryObservationStore {
    async fn check_health(&self) -> Result<DatasetHealth, ApplicationError> {
        let count = u64::try_from(self.len()).unwrap_or(u64::MAX);
        debug!(observation_count = count, "In-memory dataset health check passed");
        Ok(DatasetHealth::healthy("in-memory")
            .with_observation_count(count)
            .with_response_time(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> ObservationDate {
        ObservationDate::parse(s).unwrap()
    }

    fn station(s: &str) -> StationId {
        StationId::new(s).unwrap()
    }

    fn sample() -> InMemoryObservationStore {
        InMemoryObservationStore::new(
            vec![station("S2"), station("S1"), station("S3")],
            vec![
                Observation::new(station("S1"), day("2016-08-22")).with_precipitation(0.5),
                Observation::new(station("S2"), day("2017-08-23")).with_temperature(79.0),
                Observation::new(station("S1"), day("2017-08-23")),
                Observation::new(station("S1"), day("2017-01-01")).with_temperature(65.0),
            ],
        )
    }

    #[tokio::test]
    async fn max_date_of_empty_store_is_none() {
        let store = InMemoryObservationStore::new(vec![station("S1")], Vec::new());
        assert!(store.is_empty());
        assert_eq!(store.max_date().await.unwrap(), None);
    }

    #[tokio::test]
    async fn max_date_is_latest_observation() {
        assert_eq!(sample().max_date().await.unwrap(), Some(day("2017-08-23")));
    }

    #[tokio::test]
    async fn since_keeps_insertion_order() {
        let result = sample().observations_since(day("2017-01-01")).await.unwrap();
        let dates: Vec<String> = result.iter().map(|o| o.date.to_string()).collect();
        assert_eq!(dates, vec!["2017-08-23", "2017-08-23", "2017-01-01"]);
    }

    #[tokio::test]
    async fn range_end_is_inclusive() {
        let store = sample();
        let bounded = store
            .observations_in_range(day("2016-08-22"), Some(day("2017-01-01")))
            .await
            .unwrap();
        assert_eq!(bounded.len(), 2);

        let open = store
            .observations_in_range(day("2016-08-23"), None)
            .await
            .unwrap();
        assert_eq!(open.len(), 3);
    }

    #[tokio::test]
    async fn station_ids_keep_given_order() {
        let ids = sample().station_ids().await.unwrap();
        assert_eq!(ids, vec![station("S2"), station("S1"), station("S3")]);
    }

    #[tokio::test]
    async fn counts_include_rows_without_readings() {
        let counts = sample().observation_counts_by_station().await.unwrap();
        assert_eq!(counts[&station("S1")], 3);
        assert_eq!(counts[&station("S2")], 1);
        assert!(!counts.contains_key(&station("S3")));
    }

    #[tokio::test]
    async fn explicit_counts_replace_derived_ones() {
        let counts = HashMap::from([(station("S3"), 7)]);
        let store = sample().with_observation_counts(counts.clone());
        assert_eq!(store.observation_counts_by_station().await.unwrap(), counts);
        assert_eq!(store.len(), 4);
    }

    #[tokio::test]
    async fn health_reports_observation_count() {
        let health = sample().check_health().await.unwrap();
        assert!(health.reachable);
        assert_eq!(health.backend.as_deref(), Some("in-memory"));
        assert_eq!(health.observation_count, Some(4));
    }
}
