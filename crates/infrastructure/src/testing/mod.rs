//! Test fixtures for the persistence adapters
#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use rusqlite::params;

use crate::{
    config::DatabaseConfig,
    persistence::{ConnectionPool, MEMORY_PATH, create_pool},
};

/// Schema of the Hawaii climate dataset
pub const SCHEMA_SQL: &str = "
    CREATE TABLE measurement (
        id INTEGER NOT NULL,
        station TEXT,
        date TEXT,
        prcp FLOAT,
        tobs FLOAT,
        PRIMARY KEY (id)
    );
    CREATE TABLE station (
        id INTEGER NOT NULL,
        station TEXT,
        name TEXT,
        latitude FLOAT,
        longitude FLOAT,
        elevation FLOAT,
        PRIMARY KEY (id)
    );
";

/// One `measurement` row: station, date, prcp, tobs
pub type Row<'a> = (&'a str, &'a str, Option<f64>, Option<f64>);

/// Configuration for a private in-memory database
pub fn memory_config() -> DatabaseConfig {
    DatabaseConfig {
        path: MEMORY_PATH.to_string(),
        max_connections: 1,
        preload: false,
    }
}

/// In-memory pool holding the dataset schema and the given rows
pub fn seeded_pool(stations: &[&str], rows: &[Row<'_>]) -> Arc<ConnectionPool> {
    let pool = create_pool(&memory_config()).unwrap();
    {
        let conn = pool.get().unwrap();
        conn.execute_batch(SCHEMA_SQL).unwrap();
        for (i, station) in stations.iter().enumerate() {
            conn.execute(
                "INSERT INTO station (station, name) VALUES (?1, ?2)",
                params![station, format!("Station {}", i + 1)],
            )
            .unwrap();
        }
        for (station, date, prcp, tobs) in rows {
            conn.execute(
                "INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)",
                params![station, date, prcp, tobs],
            )
            .unwrap();
        }
    }
    Arc::new(pool)
}

/// Small dataset spanning two years across three stations
pub fn scenario_pool() -> Arc<ConnectionPool> {
    seeded_pool(
        &["S1", "S2", "S3"],
        &[
            ("S1", "2016-08-22", Some(0.5), Some(70.0)),
            ("S1", "2016-08-23", Some(0.1), Some(72.0)),
            ("S1", "2017-01-01", Some(0.0), Some(65.0)),
            ("S2", "2017-08-23", Some(0.3), Some(79.0)),
            ("S1", "2017-08-23", None, Some(81.0)),
            ("S3", "2017-08-22", Some(1.2), None),
        ],
    )
}
