use crate::http::error::ApiError;
use crate::http::response::ApiResponse;
use crate::http::router::{AppState, API_KEY_HEADER};
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use fleetwatch_domain::{RawTelemetry, TelemetrySample};

fn api_key(headers: &HeaderMap) -> Option<String> {
    headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

pub(crate) async fn ingest_vehicle(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<RawTelemetry>,
) -> Result<(StatusCode, Json<ApiResponse<TelemetrySample>>), ApiError> {
    let key = api_key(&headers);
    let sample = state.ingestion.ingest(payload, key.as_deref()).await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(ApiResponse::success(StatusCode::ACCEPTED, sample)),
    ))
}

pub(crate) async fn ingest_vehicle_batch(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payloads): Json<Vec<RawTelemetry>>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<TelemetrySample>>>), ApiError> {
    let key = api_key(&headers);
    let samples = state
        .ingestion
        .ingest_batch(payloads, key.as_deref())
        .await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(ApiResponse::success(StatusCode::ACCEPTED, samples)),
    ))
}
