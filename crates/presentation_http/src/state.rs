//! Application state shared across handlers

use std::sync::Arc;

use application::{ClimateService, DatasetHealthPort};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Climate queries over the loaded dataset
    pub climate_service: Arc<ClimateService>,
    /// Readiness check for the dataset backend
    pub dataset_health: Arc<dyn DatasetHealthPort>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("climate_service", &self.climate_service)
            .field("dataset_health", &"<DatasetHealthPort>")
            .finish()
    }
}
