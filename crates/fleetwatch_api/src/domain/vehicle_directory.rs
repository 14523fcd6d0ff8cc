use fleetwatch_domain::{validate_struct, DomainError, DomainResult, Vehicle, VehicleRegistry};
use garde::Validate;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Registration request for a vehicle. `api_key` may be supplied to pin a
/// known credential; when omitted a random one is issued.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VehicleRegistration {
    #[garde(length(chars, min = 1, max = 64))]
    pub vehicle_id: String,
    #[garde(skip)]
    pub plate_number: Option<String>,
    #[garde(skip)]
    pub driver_name: Option<String>,
    #[garde(skip)]
    pub route_name: Option<String>,
    #[garde(skip)]
    pub api_key: Option<Uuid>,
}

/// Administrative view over the vehicle registry: registering vehicles and
/// listing the fleet.
pub struct VehicleDirectoryService {
    registry: Arc<dyn VehicleRegistry>,
}

impl VehicleDirectoryService {
    pub fn new(registry: Arc<dyn VehicleRegistry>) -> Self {
        Self { registry }
    }

    /// Register or replace a vehicle. Re-registering an existing vehicle_id
    /// overwrites its record, including the credential.
    #[instrument(skip(self, registration), fields(vehicle_id = %registration.vehicle_id))]
    pub async fn register(&self, registration: VehicleRegistration) -> DomainResult<Vehicle> {
        let vehicle_id = registration.vehicle_id.trim().to_string();
        if vehicle_id.is_empty() {
            return Err(DomainError::ValidationError(
                "vehicle_id must not be empty".into(),
            ));
        }

        let trimmed = VehicleRegistration {
            vehicle_id: vehicle_id.clone(),
            ..registration.clone()
        };
        validate_struct(&trimmed)?;

        let vehicle = Vehicle {
            vehicle_id,
            plate_number: registration.plate_number,
            driver_name: registration.driver_name,
            route_name: registration.route_name,
            api_key: registration.api_key.unwrap_or_else(Uuid::new_v4),
        };

        let stored = self.registry.upsert(vehicle).await?;
        info!(vehicle_id = %stored.vehicle_id, "vehicle registered");
        Ok(stored)
    }

    pub async fn list(&self) -> DomainResult<Vec<Vehicle>> {
        self.registry.list_all().await
    }
}
