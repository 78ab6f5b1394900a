//! Climate data handlers

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};
use domain::{ObservationDate, StationId, TemperatureObservation, TemperatureStats};
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Parse a date path segment, rejecting anything but `YYYY-MM-DD`
fn parse_date(raw: &str) -> Result<ObservationDate, ApiError> {
    ObservationDate::parse(raw).map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// Precipitation of the last year keyed by date
#[instrument(skip(state))]
pub async fn precipitation(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<ObservationDate, Option<f64>>>, ApiError> {
    let readings = state.climate_service.precipitation_last_year().await?;
    Ok(Json(readings))
}

/// Every station id
#[instrument(skip(state))]
pub async fn stations(State(state): State<AppState>) -> Result<Json<Vec<StationId>>, ApiError> {
    let stations = state.climate_service.all_station_ids().await?;
    Ok(Json(stations))
}

/// Last year of temperatures from the most active station
#[instrument(skip(state))]
pub async fn tobs(
    State(state): State<AppState>,
) -> Result<Json<Vec<TemperatureObservation>>, ApiError> {
    let observations = state
        .climate_service
        .most_active_station_temperatures()
        .await?;
    Ok(Json(observations))
}

/// Temperature statistics from `start` onwards
#[instrument(skip(state))]
pub async fn stats_from(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<TemperatureStats>, ApiError> {
    let Path(start) = path?;
    let start = parse_date(&start)?;
    let stats = state.climate_service.temperature_stats(start, None).await?;
    Ok(Json(stats))
}

/// Temperature statistics between `start` and `end`, both inclusive
#[instrument(skip(state))]
pub async fn stats_between(
    State(state): State<AppState>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<TemperatureStats>, ApiError> {
    let Path((start, end)) = path?;
    let start = parse_date(&start)?;
    let end = parse_date(&end)?;
    let stats = state
        .climate_service
        .temperature_stats(start, Some(end))
        .await?;
    Ok(Json(stats))
}
