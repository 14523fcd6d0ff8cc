mod client;
mod models;
mod schema;
mod telemetry_store;

pub use client::ClickHouseClient;
pub use models::TelemetryRow;
pub use schema::ensure_schema;
pub use telemetry_store::{
    ClickHouseTelemetryStore, TelemetryStoreConfig, DEFAULT_LATEST_LOOKBACK_SECS,
};
