use crate::client::ClickHouseClient;
use crate::models::TelemetryRow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use clickhouse::Row;
use fleetwatch_domain::{
    DomainError, DomainResult, TelemetrySample, TelemetryStore, TemperatureSummary, WindowSpec,
};
use serde::Deserialize;
use tracing::{debug, error};

/// Lookback bound applied to "latest" queries. A vehicle silent for longer
/// than this reports as having no telemetry even if older history exists.
pub const DEFAULT_LATEST_LOOKBACK_SECS: u64 = 7 * 24 * 60 * 60;

#[derive(Debug, Clone)]
pub struct TelemetryStoreConfig {
    pub table: String,
    pub latest_lookback_secs: u64,
}

impl Default for TelemetryStoreConfig {
    fn default() -> Self {
        Self {
            table: "vehicle_telemetry".to_string(),
            latest_lookback_secs: DEFAULT_LATEST_LOOKBACK_SECS,
        }
    }
}

/// ClickHouse implementation of the telemetry store.
///
/// All caller-supplied values reach queries through `bind()`, never through
/// string interpolation; only the configured table name is formatted in.
#[derive(Clone)]
pub struct ClickHouseTelemetryStore {
    client: ClickHouseClient,
    config: TelemetryStoreConfig,
}

#[derive(Debug, Row, Deserialize)]
struct TemperatureSummaryRow {
    sample_count: u64,
    temperature_min: f64,
    temperature_avg: f64,
    temperature_max: f64,
}

impl ClickHouseTelemetryStore {
    pub fn new(client: ClickHouseClient, config: TelemetryStoreConfig) -> Self {
        Self { client, config }
    }

    fn select_columns(&self) -> String {
        format!(
            "SELECT vehicle_id, latitude, longitude, cabin_temperature_c, smoke_detected, \
             recorded_at FROM {}",
            self.config.table
        )
    }
}

#[async_trait]
impl TelemetryStore for ClickHouseTelemetryStore {
    async fn write_batch(&self, samples: Vec<TelemetrySample>) -> DomainResult<()> {
        if samples.is_empty() {
            return Err(DomainError::EmptyBatch);
        }

        debug!(
            sample_count = samples.len(),
            table = %self.config.table,
            "writing telemetry batch to ClickHouse"
        );

        let rows: Vec<TelemetryRow> = samples.iter().map(TelemetryRow::from).collect();

        let mut insert = self
            .client
            .get_client()
            .insert::<TelemetryRow>(&self.config.table)
            .await
            .map_err(|e| {
                error!("failed to create ClickHouse insert: {}", e);
                DomainError::StoreError(e.into())
            })?;

        for row in &rows {
            insert.write(row).await.map_err(|e| {
                error!("failed to write telemetry row: {}", e);
                DomainError::StoreError(e.into())
            })?;
        }

        insert.end().await.map_err(|e| {
            error!("failed to finalize telemetry insert: {}", e);
            DomainError::StoreError(e.into())
        })?;

        debug!(rows_written = rows.len(), "telemetry batch stored");
        Ok(())
    }

    async fn latest(&self, vehicle_id: &str) -> DomainResult<Option<TelemetrySample>> {
        let sql = format!(
            "{} WHERE vehicle_id = ? AND recorded_at >= now64(6) - INTERVAL ? SECOND \
             ORDER BY recorded_at DESC LIMIT 1",
            self.select_columns()
        );

        let row = self
            .client
            .get_client()
            .query(&sql)
            .bind(vehicle_id)
            .bind(self.config.latest_lookback_secs)
            .fetch_optional::<TelemetryRow>()
            .await
            .map_err(|e| DomainError::StoreError(e.into()))?;

        Ok(row.map(TelemetrySample::from))
    }

    async fn history(
        &self,
        vehicle_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        limit: u32,
    ) -> DomainResult<Vec<TelemetrySample>> {
        let sql = format!(
            "{} WHERE vehicle_id = ? \
             AND recorded_at >= fromUnixTimestamp64Micro(?, 'UTC') \
             AND recorded_at <= fromUnixTimestamp64Micro(?, 'UTC') \
             ORDER BY recorded_at DESC LIMIT ?",
            self.select_columns()
        );

        let rows = self
            .client
            .get_client()
            .query(&sql)
            .bind(vehicle_id)
            .bind(start.timestamp_micros())
            .bind(end.timestamp_micros())
            .bind(limit)
            .fetch_all::<TelemetryRow>()
            .await
            .map_err(|e| DomainError::StoreError(e.into()))?;

        debug!(
            vehicle_id,
            row_count = rows.len(),
            "fetched telemetry history"
        );

        Ok(rows.into_iter().map(TelemetrySample::from).collect())
    }

    async fn aggregates(
        &self,
        vehicle_id: &str,
        window: WindowSpec,
    ) -> DomainResult<Option<TemperatureSummary>> {
        // Grouping by vehicle_id makes an empty window yield zero rows rather
        // than one all-NULL row, which is what distinguishes "no data" here.
        let sql = format!(
            "SELECT count() AS sample_count, \
             min(cabin_temperature_c) AS temperature_min, \
             avg(cabin_temperature_c) AS temperature_avg, \
             max(cabin_temperature_c) AS temperature_max \
             FROM {} \
             WHERE vehicle_id = ? AND recorded_at >= now64(6) - INTERVAL ? SECOND \
             GROUP BY vehicle_id",
            self.config.table
        );

        let row = self
            .client
            .get_client()
            .query(&sql)
            .bind(vehicle_id)
            .bind(window.as_seconds())
            .fetch_optional::<TemperatureSummaryRow>()
            .await
            .map_err(|e| DomainError::StoreError(e.into()))?;

        Ok(row.map(|r| TemperatureSummary {
            count: r.sample_count,
            temperature_min: r.temperature_min,
            temperature_avg: r.temperature_avg,
            temperature_max: r.temperature_max,
        }))
    }
}
