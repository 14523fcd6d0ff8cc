use crate::error::DomainResult;
use crate::window::WindowSpec;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use garde::Validate;
use serde::{Deserialize, Serialize};

/// Untrusted inbound telemetry as submitted by a vehicle.
///
/// `timestamp` is optional; when present without an offset it is interpreted
/// as UTC, never as local time. `smoke_detected` only accepts a JSON boolean.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RawTelemetry {
    #[garde(length(chars, min = 1, max = 64))]
    pub vehicle_id: String,
    /// Decimal degrees
    #[garde(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    /// Decimal degrees
    #[garde(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    /// Cabin temperature in Celsius
    #[garde(range(min = -50.0, max = 100.0))]
    pub cabin_temperature_c: f64,
    #[garde(skip)]
    pub smoke_detected: bool,
    #[garde(skip)]
    #[serde(default, deserialize_with = "crate::time::flexible_timestamp::deserialize")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Normalized telemetry sample. Immutable once constructed; coordinates are
/// rounded to 6 decimal places and temperature to 2, timestamps are UTC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySample {
    pub vehicle_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub cabin_temperature_c: f64,
    pub smoke_detected: bool,
    pub timestamp: DateTime<Utc>,
}

/// Raw reductions over `cabin_temperature_c` within a trailing window, as
/// returned by the store adapter. Absent entirely when the window matched no
/// points.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureSummary {
    pub count: u64,
    pub temperature_min: f64,
    pub temperature_avg: f64,
    pub temperature_max: f64,
}

/// Windowed aggregate response shaped for callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryAggregates {
    pub vehicle_id: String,
    /// Window used for aggregation, e.g. "1h" or "24h"
    pub window: String,
    pub count: u64,
    pub temperature_min: Option<f64>,
    pub temperature_avg: Option<f64>,
    pub temperature_max: Option<f64>,
}

/// Time-series store seam for telemetry samples.
///
/// Implementations translate samples to the store's point representation and
/// own all query construction. Each call is one independent round-trip; the
/// adapter holds no cross-call state beyond client handles.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait TelemetryStore: Send + Sync {
    /// Submit all samples as one logical batch. All-or-nothing from the
    /// caller's perspective; there is no per-point partial-success reporting.
    async fn write_batch(&self, samples: Vec<TelemetrySample>) -> DomainResult<()>;

    /// Newest sample within the configured recency lookback, if any.
    async fn latest(&self, vehicle_id: &str) -> DomainResult<Option<TelemetrySample>>;

    /// Samples within the closed range [start, end], newest first. The caller
    /// guarantees `start < end` and a limit already clamped to 1..=5000.
    async fn history(
        &self,
        vehicle_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        limit: u32,
    ) -> DomainResult<Vec<TelemetrySample>>;

    /// count/min/avg/max over cabin temperature in the trailing window.
    /// `None` when the window matched no points.
    async fn aggregates(
        &self,
        vehicle_id: &str,
        window: WindowSpec,
    ) -> DomainResult<Option<TemperatureSummary>>;
}
