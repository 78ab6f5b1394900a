//! Value Objects - Immutable, identity-less domain primitives

mod observation_date;
mod station_id;

pub use observation_date::ObservationDate;
pub use station_id::StationId;
