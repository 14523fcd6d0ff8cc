use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{TimeZone, Utc};
use fleetwatch_api::{
    build_router, ApiResponse, AppState, CredentialGate, TelemetryIngestionService,
    TelemetryQueryService, VehicleDirectoryService,
};
use fleetwatch_domain::{
    MockTelemetryStore, MockVehicleRegistry, TelemetryAggregates, TelemetrySample,
    TemperatureSummary, Vehicle,
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

const API_KEY_HEADER: &str = "x-vehicle-api-key";

fn app(registry: MockVehicleRegistry, store: MockTelemetryStore) -> axum::Router {
    let registry = Arc::new(registry);
    let store = Arc::new(store);
    let state = AppState {
        ingestion: Arc::new(TelemetryIngestionService::new(
            CredentialGate::new(registry.clone()),
            store.clone(),
        )),
        queries: Arc::new(TelemetryQueryService::new(store)),
        directory: Arc::new(VehicleDirectoryService::new(registry)),
    };
    build_router(state)
}

fn registered_bus(key: Uuid) -> MockVehicleRegistry {
    let mut registry = MockVehicleRegistry::new();
    registry.expect_lookup().returning(move |vehicle_id| {
        if vehicle_id == "bus-1" {
            Ok(Some(Vehicle {
                vehicle_id: "bus-1".to_string(),
                plate_number: Some("ABC-001".to_string()),
                driver_name: None,
                route_name: None,
                api_key: key,
            }))
        } else {
            Ok(None)
        }
    });
    registry
}

fn telemetry_json(vehicle_id: &str) -> serde_json::Value {
    serde_json::json!({
        "vehicle_id": vehicle_id,
        "latitude": 25.123456789,
        "longitude": 55.987654321,
        "cabin_temperature_c": 21.456,
        "smoke_detected": true,
        "timestamp": "2024-05-01T12:00:00Z"
    })
}

fn post(uri: &str, body: serde_json::Value, api_key: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(key) = api_key {
        builder = builder.header(API_KEY_HEADER, key);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn ingest_accepts_and_echoes_the_normalized_sample() {
    let key = Uuid::new_v4();
    let mut store = MockTelemetryStore::new();
    store
        .expect_write_batch()
        .withf(|samples: &Vec<TelemetrySample>| samples.len() == 1)
        .times(1)
        .return_once(|_| Ok(()));

    let app = app(registered_bus(key), store);
    let response = app
        .oneshot(post(
            "/api/v1/ingest/vehicle",
            telemetry_json("bus-1"),
            Some(&key.to_string()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let body: ApiResponse<TelemetrySample> =
        serde_json::from_value(body_json(response).await).unwrap();
    let sample = body.data.unwrap();
    assert_eq!(sample.vehicle_id, "bus-1");
    assert_eq!(sample.latitude, 25.123457);
    assert_eq!(sample.cabin_temperature_c, 21.46);
    assert!(sample.smoke_detected);
}

#[tokio::test]
async fn ingest_without_api_key_is_unauthorized() {
    let app = app(MockVehicleRegistry::new(), MockTelemetryStore::new());
    let response = app
        .oneshot(post(
            "/api/v1/ingest/vehicle",
            telemetry_json("bus-1"),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn ingest_with_wrong_vehicles_key_is_forbidden() {
    let key = Uuid::new_v4();
    let app = app(registered_bus(key), MockTelemetryStore::new());
    // bus-2 is unknown to the registry; bus-1's key cannot authorize it
    let response = app
        .oneshot(post(
            "/api/v1/ingest/vehicle",
            telemetry_json("bus-2"),
            Some(&key.to_string()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn batch_mixing_vehicles_is_rejected() {
    let app = app(MockVehicleRegistry::new(), MockTelemetryStore::new());
    let body = serde_json::json!([telemetry_json("bus-1"), telemetry_json("bus-2")]);
    let response = app
        .oneshot(post("/api/v1/ingest/vehicle/batch", body, Some("any-key")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["status"], 400);
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn batch_for_one_vehicle_is_stored_as_one_write() {
    let key = Uuid::new_v4();
    let mut store = MockTelemetryStore::new();
    store
        .expect_write_batch()
        .withf(|samples: &Vec<TelemetrySample>| {
            samples.len() == 2 && samples.iter().all(|s| s.vehicle_id == "bus-1")
        })
        .times(1)
        .return_once(|_| Ok(()));

    let app = app(registered_bus(key), store);
    let body = serde_json::json!([telemetry_json("bus-1"), telemetry_json(" bus-1 ")]);
    let response = app
        .oneshot(post(
            "/api/v1/ingest/vehicle/batch",
            body,
            Some(&key.to_string()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
}

#[tokio::test]
async fn store_outage_maps_to_bad_gateway() {
    let key = Uuid::new_v4();
    let mut store = MockTelemetryStore::new();
    store
        .expect_write_batch()
        .return_once(|_| Err(fleetwatch_domain::DomainError::StoreError(anyhow::anyhow!("down"))));

    let app = app(registered_bus(key), store);
    let response = app
        .oneshot(post(
            "/api/v1/ingest/vehicle",
            telemetry_json("bus-1"),
            Some(&key.to_string()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn latest_returns_404_when_vehicle_is_silent() {
    let mut store = MockTelemetryStore::new();
    store.expect_latest().return_once(|_| Ok(None));

    let app = app(MockVehicleRegistry::new(), store);
    let response = app
        .oneshot(get("/api/v1/vehicles/bus-1/telemetry/latest"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn latest_returns_the_sample() {
    let sample = TelemetrySample {
        vehicle_id: "bus-1".to_string(),
        latitude: 25.1,
        longitude: 55.2,
        cabin_temperature_c: 20.5,
        smoke_detected: false,
        timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
    };
    let returned = sample.clone();
    let mut store = MockTelemetryStore::new();
    store
        .expect_latest()
        .withf(|id| id == "bus-1")
        .return_once(move |_| Ok(Some(returned)));

    let app = app(MockVehicleRegistry::new(), store);
    let response = app
        .oneshot(get("/api/v1/vehicles/bus-1/telemetry/latest"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: ApiResponse<TelemetrySample> =
        serde_json::from_value(body_json(response).await).unwrap();
    assert_eq!(body.data.unwrap(), sample);
}

#[tokio::test]
async fn history_clamps_oversized_limits() {
    let mut store = MockTelemetryStore::new();
    store
        .expect_history()
        .withf(|_, _, _, limit| *limit == 5_000)
        .times(1)
        .return_once(|_, _, _, _| Ok(Vec::new()));

    let app = app(MockVehicleRegistry::new(), store);
    let response = app
        .oneshot(get(
            "/api/v1/vehicles/bus-1/telemetry/history?limit=100000",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn history_with_inverted_range_is_a_bad_request() {
    let app = app(MockVehicleRegistry::new(), MockTelemetryStore::new());
    let response = app
        .oneshot(get(
            "/api/v1/vehicles/bus-1/telemetry/history?start=2024-05-02T00:00:00Z&end=2024-05-01T00:00:00Z",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn aggregates_summarize_the_window() {
    let mut store = MockTelemetryStore::new();
    store
        .expect_aggregates()
        .withf(|id, window| id == "bus-1" && window.as_seconds() == 86_400)
        .return_once(|_, _| {
            Ok(Some(TemperatureSummary {
                count: 2,
                temperature_min: 20.0,
                temperature_avg: 25.0,
                temperature_max: 30.0,
            }))
        });

    let app = app(MockVehicleRegistry::new(), store);
    let response = app
        .oneshot(get("/api/v1/vehicles/bus-1/telemetry/aggregates?window=24h"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: ApiResponse<TelemetryAggregates> =
        serde_json::from_value(body_json(response).await).unwrap();
    let aggregates = body.data.unwrap();
    assert_eq!(aggregates.count, 2);
    assert_eq!(aggregates.temperature_min, Some(20.0));
    assert_eq!(aggregates.temperature_max, Some(30.0));
}

#[tokio::test]
async fn aggregates_over_an_empty_window_are_not_found() {
    let mut store = MockTelemetryStore::new();
    store.expect_aggregates().return_once(|_, _| Ok(None));

    let app = app(MockVehicleRegistry::new(), store);
    let response = app
        .oneshot(get("/api/v1/vehicles/bus-1/telemetry/aggregates?window=1h"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn aggregates_reject_malformed_window_specifiers() {
    let app = app(MockVehicleRegistry::new(), MockTelemetryStore::new());
    let response = app
        .oneshot(get("/api/v1/vehicles/bus-1/telemetry/aggregates?window=1w"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn registering_a_vehicle_without_a_key_issues_one() {
    let mut registry = MockVehicleRegistry::new();
    registry
        .expect_upsert()
        .withf(|vehicle: &Vehicle| vehicle.vehicle_id == "bus-4" && !vehicle.api_key.is_nil())
        .times(1)
        .returning(Ok);

    let app = app(registry, MockTelemetryStore::new());
    let response = app
        .oneshot(post(
            "/api/v1/vehicles",
            serde_json::json!({ "vehicle_id": "bus-4", "plate_number": "ABC-004" }),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: ApiResponse<Vehicle> = serde_json::from_value(body_json(response).await).unwrap();
    let vehicle = body.data.unwrap();
    assert_eq!(vehicle.vehicle_id, "bus-4");
    assert!(!vehicle.api_key.is_nil());
}

#[tokio::test]
async fn listing_vehicles_returns_the_fleet() {
    let mut registry = MockVehicleRegistry::new();
    registry.expect_list_all().return_once(|| {
        Ok(vec![Vehicle {
            vehicle_id: "bus-1".to_string(),
            plate_number: Some("ABC-001".to_string()),
            driver_name: None,
            route_name: None,
            api_key: Uuid::new_v4(),
        }])
    });

    let app = app(registry, MockTelemetryStore::new());
    let response = app.oneshot(get("/api/v1/vehicles")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: ApiResponse<Vec<Vehicle>> =
        serde_json::from_value(body_json(response).await).unwrap();
    assert_eq!(body.data.unwrap()[0].vehicle_id, "bus-1");
}

#[tokio::test]
async fn health_endpoint_is_open() {
    let app = app(MockVehicleRegistry::new(), MockTelemetryStore::new());
    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
