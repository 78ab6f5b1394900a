//! SQLite observation store implementation
//!
//! Implements the `ObservationStore` port over the `measurement` and
//! `station` tables of the climate dataset.

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use application::{error::ApplicationError, ports::ObservationStore};
use async_trait::async_trait;
use domain::{Observation, ObservationDate, StationId};
use rusqlite::{Connection, Params, Row, params, types::ValueRef};
use tokio::task;
use tracing::{debug, instrument, warn};

use super::{
    connection::ConnectionPool,
    error::{map_join_error, map_pool_error, map_sqlite_error},
    in_memory_store::InMemoryObservationStore,
};

const SELECT_MEASUREMENT: &str = "SELECT station, date, prcp, tobs FROM measurement";

/// SQLite-based observation store
#[derive(Debug, Clone)]
pub struct SqliteObservationStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteObservationStore {
    /// Create a new SQLite observation store
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Run a read on a pooled connection off the async runtime
    async fn query<T, F>(&self, read: F) -> Result<T, ApplicationError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, rusqlite::Error> + Send + 'static,
    {
        let pool = Arc::clone(&self.pool);

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(|e| map_pool_error(&e))?;
            read(&conn).map_err(|e| map_sqlite_error(&e))
        })
        .await
        .map_err(|e| map_join_error(&e))?
    }

    /// Every valid observation in enumeration order
    #[instrument(skip(self))]
    pub async fn all_observations(&self) -> Result<Vec<Observation>, ApplicationError> {
        self.query(|conn| {
            read_observations(conn, &format!("{SELECT_MEASUREMENT} ORDER BY rowid"), [])
        })
        .await
    }

    /// Copy the whole dataset into an in-memory store
    #[instrument(skip(self))]
    pub async fn snapshot(&self) -> Result<InMemoryObservationStore, ApplicationError> {
        let stations = self.station_ids().await?;
        let observations = self.all_observations().await?;
        let counts = self.observation_counts_by_station().await?;

        debug!(
            stations = stations.len(),
            observations = observations.len(),
            "Loaded dataset snapshot"
        );
        Ok(InMemoryObservationStore::new(stations, observations).with_observation_counts(counts))
    }
}

#[async_trait]
impl ObservationStore for SqliteObservationStore {
    #[instrument(skip(self))]
    async fn max_date(&self) -> Result<Option<ObservationDate>, ApplicationError> {
        self.query(|conn| {
            let mut stmt = conn.prepare_cached(
                "SELECT date FROM measurement WHERE date IS NOT NULL ORDER BY date DESC",
            )?;
            let mut rows = stmt.query([])?;

            while let Some(row) = rows.next()? {
                let Some(text) = text_cell(row.get_ref(0)?) else {
                    warn!("Skipping non-text measurement date");
                    continue;
                };
                if let Ok(date) = ObservationDate::parse(&text) {
                    return Ok(Some(date));
                }
                warn!(date = %text, "Skipping malformed measurement date");
            }
            Ok(None)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn observations_since(
        &self,
        cutoff: ObservationDate,
    ) -> Result<Vec<Observation>, ApplicationError> {
        let cutoff = cutoff.to_string();

        self.query(move |conn| {
            read_observations(
                conn,
                &format!("{SELECT_MEASUREMENT} WHERE date >= ?1 ORDER BY rowid"),
                params![cutoff],
            )
        })
        .await
    }

    #[instrument(skip(self))]
    async fn observations_in_range(
        &self,
        start: ObservationDate,
        end: Option<ObservationDate>,
    ) -> Result<Vec<Observation>, ApplicationError> {
        let start = start.to_string();
        let end = end.map(|d| d.to_string());

        self.query(move |conn| {
            read_observations(
                conn,
                &format!(
                    "{SELECT_MEASUREMENT} WHERE date >= ?1 AND (?2 IS NULL OR date <= ?2) \
                     ORDER BY rowid"
                ),
                params![start, end],
            )
        })
        .await
    }

    #[instrument(skip(self))]
    async fn station_ids(&self) -> Result<Vec<StationId>, ApplicationError> {
        self.query(|conn| {
            let mut stmt = conn.prepare_cached("SELECT station FROM station ORDER BY rowid")?;
            let rows = stmt.query_map([], |row| Ok(text_cell(row.get_ref(0)?)))?;

            let mut seen = HashSet::new();
            let mut stations = Vec::new();
            for row in rows {
                let Some(id) = row?.and_then(|s| StationId::new(s).ok()) else {
                    warn!("Skipping station row without an id");
                    continue;
                };
                if seen.insert(id.clone()) {
                    stations.push(id);
                }
            }
            Ok(stations)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn observation_counts_by_station(
        &self,
    ) -> Result<HashMap<StationId, u64>, ApplicationError> {
        self.query(|conn| {
            let mut stmt = conn.prepare_cached(
                "SELECT station, COUNT(*) FROM measurement \
                 WHERE station IS NOT NULL GROUP BY station",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok((text_cell(row.get_ref(0)?), row.get::<_, i64>(1)?))
            })?;

            let mut counts = HashMap::new();
            for row in rows {
                let (station, count) = row?;
                if let Some(id) = station.and_then(|s| StationId::new(s).ok()) {
                    counts.insert(id, u64::try_from(count).unwrap_or_default());
                }
            }
            Ok(counts)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn observations_for_station_since(
        &self,
        station: &StationId,
        cutoff: ObservationDate,
    ) -> Result<Vec<Observation>, ApplicationError> {
        let station = station.as_str().to_string();
        let cutoff = cutoff.to_string();

        self.query(move |conn| {
            read_observations(
                conn,
                &format!("{SELECT_MEASUREMENT} WHERE station = ?1 AND date >= ?2 ORDER BY rowid"),
                params![station, cutoff],
            )
        })
        .await
    }
}

/// UTF-8 text cell, `None` for any other storage class
fn text_cell(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Text(bytes) => std::str::from_utf8(bytes).ok().map(str::to_owned),
        _ => None,
    }
}

/// Numeric cell as a reading. The outer `None` marks a non-numeric cell.
#[allow(clippy::cast_precision_loss)]
fn reading_cell(value: ValueRef<'_>) -> Option<Option<f64>> {
    match value {
        ValueRef::Null => Some(None),
        ValueRef::Real(f) => Some(Some(f)),
        ValueRef::Integer(i) => Some(Some(i as f64)),
        ValueRef::Text(_) | ValueRef::Blob(_) => None,
    }
}

/// A `measurement` row before validation
struct RawMeasurement {
    station: Option<String>,
    date: Option<String>,
    prcp: Option<f64>,
    tobs: Option<f64>,
    unreadable: bool,
}

impl RawMeasurement {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let prcp = reading_cell(row.get_ref(2)?);
        let tobs = reading_cell(row.get_ref(3)?);
        Ok(Self {
            station: text_cell(row.get_ref(0)?),
            date: text_cell(row.get_ref(1)?),
            unreadable: prcp.is_none() || tobs.is_none(),
            prcp: prcp.flatten(),
            tobs: tobs.flatten(),
        })
    }

    fn into_observation(self) -> Option<Observation> {
        let station_id = StationId::new(self.station?).ok()?;
        let date = ObservationDate::parse(self.date.as_deref()?).ok()?;
        Some(Observation {
            station_id,
            date,
            precipitation: self.prcp,
            temperature: self.tobs,
        })
    }
}

/// Query measurement rows, dropping those with a malformed station or date
fn read_observations<P: Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> Result<Vec<Observation>, rusqlite::Error> {
    let mut stmt = conn.prepare_cached(sql)?;
    let rows = stmt.query_map(params, RawMeasurement::from_row)?;

    let mut observations = Vec::new();
    let mut skipped = 0_usize;
    let mut unreadable = 0_usize;
    for row in rows {
        let raw = row?;
        unreadable += usize::from(raw.unreadable);
        match raw.into_observation() {
            Some(observation) => observations.push(observation),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!(skipped, "Skipped measurement rows with a malformed station or date");
    }
    if unreadable > 0 {
        warn!(unreadable, "Treated non-numeric readings as missing");
    }
    debug!(count = observations.len(), "Read observations");
    Ok(observations)
}
