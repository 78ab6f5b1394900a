//! Database connection management
//!
//! Provides a read-only SQLite connection pool via r2d2.

use std::path::Path;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection, OpenFlags};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::DatabaseConfig;

/// Path that selects a private in-memory database
pub const MEMORY_PATH: &str = ":memory:";

/// Tables the dataset must provide
const REQUIRED_TABLES: [&str; 2] = ["measurement", "station"];

/// Database errors
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Database not found: {0}")]
    NotFound(String),

    #[error("Dataset is missing table: {0}")]
    MissingTable(String),
}

/// SQLite connection pool type alias
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Create a new connection pool over the dataset
///
/// File databases are opened read-only and must already contain the
/// `measurement` and `station` tables. An in-memory database is writable so
/// that tests can seed it, and is limited to one connection since every
/// SQLite `:memory:` connection is a separate database.
pub fn create_pool(config: &DatabaseConfig) -> Result<ConnectionPool, DatabaseError> {
    info!(path = %config.path, max_connections = config.max_connections, "Creating dataset connection pool");

    let in_memory = config.path == MEMORY_PATH;

    let (manager, max_size) = if in_memory {
        (SqliteConnectionManager::memory(), 1)
    } else {
        if !Path::new(&config.path).is_file() {
            return Err(DatabaseError::NotFound(config.path.clone()));
        }
        let manager = SqliteConnectionManager::file(&config.path)
            .with_flags(
                OpenFlags::SQLITE_OPEN_READ_ONLY
                    | OpenFlags::SQLITE_OPEN_URI
                    | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )
            .with_init(initialize_connection);
        (manager, config.max_connections.max(1))
    };

    let pool = Pool::builder().max_size(max_size).build(manager)?;

    if !in_memory {
        let conn = pool.get()?;
        verify_schema(&conn)?;
    }

    debug!("Dataset connection pool created successfully");
    Ok(pool)
}

/// Per-connection settings for the read-only dataset
fn initialize_connection(conn: &mut Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "
        PRAGMA query_only = ON;
        PRAGMA busy_timeout = 5000;
        ",
    )
}

/// Check that the dataset tables exist
fn verify_schema(conn: &Connection) -> Result<(), DatabaseError> {
    for table in REQUIRED_TABLES {
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
            [table],
            |row| row.get(0),
        )?;
        if !exists {
            return Err(DatabaseError::MissingTable(table.to_string()));
        }
    }
    Ok(())
}
