use crate::error::DomainResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registered vehicle identity with its ingestion credential.
///
/// At most one identity exists per `vehicle_id`; the api key is stable once
/// stored except through an explicit upsert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub vehicle_id: String,
    pub plate_number: Option<String>,
    pub driver_name: Option<String>,
    pub route_name: Option<String>,
    pub api_key: Uuid,
}

/// Vehicle registry seam. PostgreSQL implements this in fleetwatch-postgres.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait VehicleRegistry: Send + Sync {
    async fn lookup(&self, vehicle_id: &str) -> DomainResult<Option<Vehicle>>;

    /// Insert or fully replace the record for `vehicle.vehicle_id`.
    async fn upsert(&self, vehicle: Vehicle) -> DomainResult<Vehicle>;

    /// Insert only when no record exists; an existing record is left as is.
    async fn insert_if_missing(&self, vehicle: Vehicle) -> DomainResult<Vehicle>;

    async fn list_all(&self) -> DomainResult<Vec<Vehicle>>;
}
