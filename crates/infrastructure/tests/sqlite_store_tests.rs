//! End-to-end tests of the SQLite adapters against a dataset file

use std::sync::Arc;

use application::{error::ApplicationError, ports::DatasetHealthPort, services::ClimateService};
use domain::{ObservationDate, StationId};
use infrastructure::{DatabaseConfig, SqliteDatasetHealth, SqliteObservationStore, create_pool};
use rusqlite::{Connection, params};
use tempfile::NamedTempFile;

const SCHEMA: &str = "
    CREATE TABLE measurement (
        id INTEGER NOT NULL, station TEXT, date TEXT, prcp FLOAT, tobs FLOAT,
        PRIMARY KEY (id)
    );
    CREATE TABLE station (
        id INTEGER NOT NULL, station TEXT, name TEXT,
        latitude FLOAT, longitude FLOAT, elevation FLOAT,
        PRIMARY KEY (id)
    );
";

type Row<'a> = (&'a str, &'a str, Option<f64>, Option<f64>);

fn write_dataset(file: &NamedTempFile, stations: &[&str], rows: &[Row<'_>]) {
    let conn = Connection::open(file.path()).unwrap();
    conn.execute_batch(SCHEMA).unwrap();
    for station in stations {
        conn.execute(
            "INSERT INTO station (station, name, latitude, longitude, elevation) \
             VALUES (?1, 'WAIKIKI 717.2, HI US', 21.2716, -157.8168, 3.0)",
            params![station],
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

fn open(file: &NamedTempFile) -> Arc<infrastructure::ConnectionPool> {
    let config = DatabaseConfig {
        path: file.path().to_string_lossy().into_owned(),
        max_connections: 2,
        preload: false,
    };
    Arc::new(create_pool(&config).unwrap())
}

fn day(s: &str) -> ObservationDate {
    ObservationDate::parse(s).unwrap()
}

fn scenario_file() -> NamedTempFile {
    let file = NamedTempFile::new().unwrap();
    write_dataset(
        &file,
        &["S1", "S2"],
        &[
            ("S1", "2016-08-22", Some(0.5), Some(70.0)),
            ("S1", "2016-08-23", Some(0.1), Some(72.0)),
            ("S1", "2017-01-01", Some(0.0), Some(65.0)),
            ("S2", "2017-08-23", Some(0.3), Some(79.0)),
            ("S1", "2017-08-23", None, Some(81.0)),
        ],
    );
    file
}

#[tokio::test]
async fn climate_queries_over_sqlite_file() {
    let file = scenario_file();
    let service = ClimateService::new(Arc::new(SqliteObservationStore::new(open(&file))));

    assert_eq!(service.max_date().await.unwrap(), day("2017-08-23"));
    assert_eq!(service.last_year_cutoff().await.unwrap(), day("2016-08-23"));

    let precipitation = service.precipitation_last_year().await.unwrap();
    let entries: Vec<(String, Option<f64>)> = precipitation
        .iter()
        .map(|(d, p)| (d.to_string(), *p))
        .collect();
    assert_eq!(
        entries,
        vec![
            ("2016-08-23".to_string(), Some(0.1)),
            ("2017-01-01".to_string(), Some(0.0)),
            ("2017-08-23".to_string(), None),
        ]
    );

    assert_eq!(
        service.most_active_station().await.unwrap(),
        StationId::new("S1").unwrap()
    );

    let temps: Vec<Option<f64>> = service
        .most_active_station_temperatures()
        .await
        .unwrap()
        .iter()
        .map(|t| t.temperature)
        .collect();
    assert_eq!(temps, vec![Some(72.0), Some(65.0), Some(81.0)]);

    let stats = service
        .temperature_stats(day("2017-01-01"), Some(day("2017-08-23")))
        .await
        .unwrap();
    assert!((stats.min - 65.0).abs() < f64::EPSILON);
    assert!((stats.max - 81.0).abs() < f64::EPSILON);
    assert!((stats.avg - 75.0).abs() < 1e-9);
}

#[tokio::test]
async fn empty_dataset_file_reports_empty() {
    let file = NamedTempFile::new().unwrap();
    write_dataset(&file, &["S1"], &[]);
    let service = ClimateService::new(Arc::new(SqliteObservationStore::new(open(&file))));

    assert!(matches!(
        service.max_date().await,
        Err(ApplicationError::EmptyDataset(_))
    ));
    assert!(matches!(
        service.temperature_stats(day("2017-01-01"), None).await,
        Err(ApplicationError::NoDataInRange(_))
    ));
}

#[tokio::test]
async fn health_check_counts_measurements() {
    let file = scenario_file();
    let health = SqliteDatasetHealth::new(open(&file));

    let status = health.check_health().await.unwrap();
    assert!(status.reachable);
    assert_eq!(status.observation_count, Some(5));
}

#[tokio::test]
async fn preloaded_snapshot_answers_like_sqlite() {
    let file = scenario_file();
    let sqlite = SqliteObservationStore::new(open(&file));
    let snapshot = sqlite.snapshot().await.unwrap();

    let from_sqlite = ClimateService::new(Arc::new(sqlite));
    let from_snapshot = ClimateService::new(Arc::new(snapshot));

    assert_eq!(
        from_sqlite.precipitation_last_year().await.unwrap(),
        from_snapshot.precipitation_last_year().await.unwrap()
    );
    assert_eq!(
        from_sqlite.all_station_ids().await.unwrap(),
        from_snapshot.all_station_ids().await.unwrap()
    );
    assert_eq!(
        from_sqlite.most_active_station().await.unwrap(),
        from_snapshot.most_active_station().await.unwrap()
    );
}

#[tokio::test]
async fn mistyped_cells_do_not_fail_queries() {
    let file = NamedTempFile::new().unwrap();
    write_dataset(&file, &["S1"], &[("S1", "2017-08-22", Some(0.1), Some(79.0))]);
    Connection::open(file.path())
        .unwrap()
        .execute_batch(
            "INSERT INTO measurement (station, date, prcp, tobs) VALUES \
             ('S1', '2017-08-23', '', 81.0), \
             ('S1', X'00', 0.2, 99.0)",
        )
        .unwrap();
    let service = ClimateService::new(Arc::new(SqliteObservationStore::new(open(&file))));

    assert_eq!(service.max_date().await.unwrap(), day("2017-08-23"));

    let stats = service.temperature_stats(day("2017-08-01"), None).await.unwrap();
    assert!((stats.min - 79.0).abs() < f64::EPSILON);
    assert!((stats.max - 81.0).abs() < f64::EPSILON);

    let precipitation = service.precipitation_last_year().await.unwrap();
    assert_eq!(precipitation.get(&day("2017-08-23")), Some(&None));
}
