//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod dataset_health_port;
mod observation_store;

#[cfg(test)]
pub use dataset_health_port::MockDatasetHealthPort;
pub use dataset_health_port::{DatasetHealth, DatasetHealthPort};
#[cfg(test)]
pub use observation_store::MockObservationStore;
pub use observation_store::ObservationStore;
