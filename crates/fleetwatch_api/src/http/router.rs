use crate::domain::{TelemetryIngestionService, TelemetryQueryService, VehicleDirectoryService};
use crate::http::{ingest, vehicles};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

/// Request header carrying the per-vehicle ingestion credential.
pub(crate) const API_KEY_HEADER: &str = "x-vehicle-api-key";

#[derive(Clone)]
pub struct AppState {
    pub ingestion: Arc<TelemetryIngestionService>,
    pub queries: Arc<TelemetryQueryService>,
    pub directory: Arc<VehicleDirectoryService>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/v1/ingest/vehicle", post(ingest::ingest_vehicle))
        .route(
            "/api/v1/ingest/vehicle/batch",
            post(ingest::ingest_vehicle_batch),
        )
        .route(
            "/api/v1/vehicles",
            get(vehicles::list).post(vehicles::register),
        )
        .route(
            "/api/v1/vehicles/{vehicle_id}/telemetry/latest",
            get(vehicles::latest),
        )
        .route(
            "/api/v1/vehicles/{vehicle_id}/telemetry/history",
            get(vehicles::history),
        )
        .route(
            "/api/v1/vehicles/{vehicle_id}/telemetry/aggregates",
            get(vehicles::aggregates),
        )
        .with_state(state)
}
