use crate::domain::CredentialGate;
use fleetwatch_domain::{
    normalize, DomainError, DomainResult, RawTelemetry, TelemetrySample, TelemetryStore,
};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Ingestion pipeline: credential gate, then normalization, then one batch
/// write. All-or-nothing from the caller's perspective; if the gate,
/// normalization of any item, or the batch write fails, nothing is reported
/// as stored.
pub struct TelemetryIngestionService {
    gate: CredentialGate,
    store: Arc<dyn TelemetryStore>,
}

impl TelemetryIngestionService {
    pub fn new(gate: CredentialGate, store: Arc<dyn TelemetryStore>) -> Self {
        Self { gate, store }
    }

    /// Ingest a single sample.
    #[instrument(skip(self, raw, api_key), fields(vehicle_id = %raw.vehicle_id))]
    pub async fn ingest(
        &self,
        raw: RawTelemetry,
        api_key: Option<&str>,
    ) -> DomainResult<TelemetrySample> {
        let mut samples = self.ingest_batch(vec![raw], api_key).await?;
        samples.pop().ok_or(DomainError::EmptyBatch)
    }

    /// Ingest a batch of samples for one vehicle.
    #[instrument(skip(self, raws, api_key), fields(batch_size = raws.len()))]
    pub async fn ingest_batch(
        &self,
        raws: Vec<RawTelemetry>,
        api_key: Option<&str>,
    ) -> DomainResult<Vec<TelemetrySample>> {
        if raws.is_empty() {
            return Err(DomainError::EmptyBatch);
        }

        let vehicle_ids: Vec<&str> = raws.iter().map(|raw| raw.vehicle_id.as_str()).collect();
        self.gate.authorize(&vehicle_ids, api_key).await?;

        let samples = raws
            .into_iter()
            .map(normalize)
            .collect::<DomainResult<Vec<_>>>()?;

        self.store.write_batch(samples.clone()).await?;

        debug!(stored = samples.len(), "telemetry batch ingested");
        Ok(samples)
    }
}
