use fleetwatch_domain::{DomainError, DomainResult, VehicleRegistry};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// Validates that an inbound request's vehicle identity and presented api key
/// match a single known vehicle before any write is attempted.
///
/// The check is advisory-before-write: no lock is held on the vehicle record,
/// so a key rotation racing with an in-flight request may let at most one
/// stale-key write through before the rotation propagates.
pub struct CredentialGate {
    registry: Arc<dyn VehicleRegistry>,
}

impl CredentialGate {
    pub fn new(registry: Arc<dyn VehicleRegistry>) -> Self {
        Self { registry }
    }

    /// Authorize one inbound request (single sample or batch) targeting the
    /// given vehicle ids.
    ///
    /// A batch must target exactly one vehicle; otherwise a single presented
    /// key could authorize writes for several vehicles in one request.
    pub async fn authorize(
        &self,
        vehicle_ids: &[&str],
        api_key: Option<&str>,
    ) -> DomainResult<()> {
        let api_key = match api_key {
            Some(key) if !key.is_empty() => key,
            _ => return Err(DomainError::MissingApiKey),
        };

        let unique_ids: BTreeSet<&str> = vehicle_ids
            .iter()
            .map(|id| id.trim())
            .filter(|id| !id.is_empty())
            .collect();

        let mut ids = unique_ids.into_iter();
        let vehicle_id = match (ids.next(), ids.next()) {
            (None, _) => return Err(DomainError::EmptyBatch),
            (Some(_), Some(_)) => return Err(DomainError::MixedVehicleBatch),
            (Some(id), None) => id,
        };

        let vehicle = self.registry.lookup(vehicle_id).await?;
        // Exact string match; keys are neither case-folded nor prefix-matched.
        match vehicle {
            Some(vehicle) if vehicle.api_key.to_string() == api_key => {
                debug!(vehicle_id, "api key accepted");
                Ok(())
            }
            _ => {
                warn!(vehicle_id, "rejected ingest with unknown vehicle or bad api key");
                Err(DomainError::InvalidApiKey)
            }
        }
    }
}
