use chrono::{DateTime, Duration, Utc};
use fleetwatch_domain::{
    parse_instant, DomainError, DomainResult, TelemetryAggregates, TelemetrySample,
    TelemetryStore, WindowSpec,
};
use std::sync::Arc;
use tracing::instrument;

/// Rows returned when the caller does not ask for a limit.
pub const DEFAULT_HISTORY_LIMIT: u32 = 100;
/// Hard cap on history responses; larger requests are served clamped, never
/// rejected.
pub const MAX_HISTORY_LIMIT: u32 = 5_000;

const DEFAULT_HISTORY_WINDOW_HOURS: i64 = 24;

/// Read-side orchestrator: applies time-window defaults and limit clamping,
/// then shapes store results for callers.
pub struct TelemetryQueryService {
    store: Arc<dyn TelemetryStore>,
}

impl TelemetryQueryService {
    pub fn new(store: Arc<dyn TelemetryStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn latest(&self, vehicle_id: &str) -> DomainResult<TelemetrySample> {
        self.store
            .latest(vehicle_id)
            .await?
            .ok_or_else(|| DomainError::TelemetryNotFound(vehicle_id.to_string()))
    }

    /// Bounded history, newest first. `end` defaults to now, `start` to
    /// `end - 24h`; offset-less instants are read as UTC.
    #[instrument(skip(self))]
    pub async fn history(
        &self,
        vehicle_id: &str,
        start: Option<&str>,
        end: Option<&str>,
        limit: Option<u32>,
    ) -> DomainResult<Vec<TelemetrySample>> {
        let end: DateTime<Utc> = match end {
            Some(value) => parse_instant(value)?,
            None => Utc::now(),
        };
        let start: DateTime<Utc> = match start {
            Some(value) => parse_instant(value)?,
            None => end - Duration::hours(DEFAULT_HISTORY_WINDOW_HOURS),
        };

        if start >= end {
            return Err(DomainError::InvalidRange(
                "start must be before end".to_string(),
            ));
        }

        let limit = limit
            .unwrap_or(DEFAULT_HISTORY_LIMIT)
            .clamp(1, MAX_HISTORY_LIMIT);

        self.store.history(vehicle_id, start, end, limit).await
    }

    /// Windowed temperature aggregates. An empty window is reported as
    /// not-found, whether the store returned nothing or a zero-count row.
    #[instrument(skip(self))]
    pub async fn aggregates(
        &self,
        vehicle_id: &str,
        window: &str,
    ) -> DomainResult<TelemetryAggregates> {
        let window = WindowSpec::parse(window)?;
        let summary = self.store.aggregates(vehicle_id, window.clone()).await?;

        match summary {
            Some(summary) if summary.count > 0 => Ok(TelemetryAggregates {
                vehicle_id: vehicle_id.to_string(),
                window: window.as_str().to_string(),
                count: summary.count,
                temperature_min: Some(summary.temperature_min),
                temperature_avg: Some(summary.temperature_avg),
                temperature_max: Some(summary.temperature_max),
            }),
            _ => Err(DomainError::TelemetryNotFound(vehicle_id.to_string())),
        }
    }
}
