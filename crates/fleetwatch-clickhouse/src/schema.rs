use crate::client::ClickHouseClient;
use anyhow::{Context, Result};
use tracing::info;

/// Provision the telemetry table if it does not exist yet.
///
/// ReplacingMergeTree keyed by (vehicle_id, recorded_at) means the store's
/// own overwrite semantics break ties for identical point keys: last write
/// wins after merges.
pub async fn ensure_schema(client: &ClickHouseClient, table: &str) -> Result<()> {
    let ddl = format!(
        "CREATE TABLE IF NOT EXISTS {table} (\
            vehicle_id LowCardinality(String), \
            latitude Float64, \
            longitude Float64, \
            cabin_temperature_c Float64, \
            smoke_detected UInt8, \
            recorded_at DateTime64(6, 'UTC')\
        ) ENGINE = ReplacingMergeTree \
        ORDER BY (vehicle_id, recorded_at)"
    );

    client
        .get_client()
        .query(&ddl)
        .execute()
        .await
        .with_context(|| format!("failed to provision ClickHouse table {table}"))?;

    info!(table, "ClickHouse telemetry table ready");
    Ok(())
}
