//! Domain entities - Observations and the aggregates derived from them

mod observation;
mod temperature_stats;

pub use observation::{Observation, TemperatureObservation};
pub use temperature_stats::TemperatureStats;
