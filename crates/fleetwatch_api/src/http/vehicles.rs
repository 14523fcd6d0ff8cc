use crate::domain::VehicleRegistration;
use crate::http::error::ApiError;
use crate::http::response::ApiResponse;
use crate::http::router::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use fleetwatch_domain::{TelemetryAggregates, TelemetrySample, Vehicle};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct HistoryParams {
    /// Start time. Defaults to end - 24h.
    start: Option<String>,
    /// End time. Defaults to now.
    end: Option<String>,
    /// Maximum points to return
    limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AggregateParams {
    /// Window duration, e.g. 15m, 1h, 24h
    #[serde(default = "default_window")]
    window: String,
}

fn default_window() -> String {
    "1h".to_string()
}

pub(crate) async fn register(
    State(state): State<AppState>,
    Json(registration): Json<VehicleRegistration>,
) -> Result<(StatusCode, Json<ApiResponse<Vehicle>>), ApiError> {
    let vehicle = state.directory.register(registration).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(StatusCode::CREATED, vehicle)),
    ))
}

pub(crate) async fn list(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Vehicle>>>, ApiError> {
    let vehicles = state.directory.list().await?;
    Ok(Json(ApiResponse::success(StatusCode::OK, vehicles)))
}

pub(crate) async fn latest(
    State(state): State<AppState>,
    Path(vehicle_id): Path<String>,
) -> Result<Json<ApiResponse<TelemetrySample>>, ApiError> {
    let sample = state.queries.latest(&vehicle_id).await?;
    Ok(Json(ApiResponse::success(StatusCode::OK, sample)))
}

pub(crate) async fn history(
    State(state): State<AppState>,
    Path(vehicle_id): Path<String>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<ApiResponse<Vec<TelemetrySample>>>, ApiError> {
    let samples = state
        .queries
        .history(
            &vehicle_id,
            params.start.as_deref(),
            params.end.as_deref(),
            params.limit,
        )
        .await?;
    Ok(Json(ApiResponse::success(StatusCode::OK, samples)))
}

pub(crate) async fn aggregates(
    State(state): State<AppState>,
    Path(vehicle_id): Path<String>,
    Query(params): Query<AggregateParams>,
) -> Result<Json<ApiResponse<TelemetryAggregates>>, ApiError> {
    let aggregates = state.queries.aggregates(&vehicle_id, &params.window).await?;
    Ok(Json(ApiResponse::success(StatusCode::OK, aggregates)))
}
