//! Persistence module
//!
//! Read-only access to the observation dataset, either straight from SQLite
//! or from an in-memory snapshot.

pub mod connection;
pub mod dataset_health;
pub mod error;
pub mod in_memory_store;
pub mod observation_store;

pub use connection::{ConnectionPool, DatabaseError, MEMORY_PATH, create_pool};
pub use dataset_health::SqliteDatasetHealth;
pub use in_memory_store::InMemoryObservationStore;
pub use observation_store::SqliteObservationStore;
