use chrono::{DateTime, Utc};
use clickhouse::Row;
use fleetwatch_domain::TelemetrySample;
use serde::{Deserialize, Serialize};

/// One telemetry point as stored in the `vehicle_telemetry` table.
///
/// `smoke_detected` is carried as UInt8 0/1; the table's field typing does not
/// use native booleans for sensor flags. Timestamps are DateTime64(6, 'UTC').
#[derive(Debug, Clone, Row, Serialize, Deserialize)]
pub struct TelemetryRow {
    pub vehicle_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub cabin_temperature_c: f64,
    pub smoke_detected: u8,
    #[serde(with = "clickhouse::serde::chrono::datetime64::micros")]
    pub recorded_at: DateTime<Utc>,
}

impl From<&TelemetrySample> for TelemetryRow {
    fn from(sample: &TelemetrySample) -> Self {
        TelemetryRow {
            vehicle_id: sample.vehicle_id.clone(),
            latitude: sample.latitude,
            longitude: sample.longitude,
            cabin_temperature_c: sample.cabin_temperature_c,
            smoke_detected: u8::from(sample.smoke_detected),
            recorded_at: sample.timestamp,
        }
    }
}

impl From<TelemetryRow> for TelemetrySample {
    fn from(row: TelemetryRow) -> Self {
        TelemetrySample {
            vehicle_id: row.vehicle_id,
            latitude: row.latitude,
            longitude: row.longitude,
            cabin_temperature_c: row.cabin_temperature_c,
            smoke_detected: row.smoke_detected != 0,
            timestamp: row.recorded_at,
        }
    }
}
