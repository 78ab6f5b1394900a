//! Application services - Use case implementations

mod climate_service;

pub use climate_service::ClimateService;
