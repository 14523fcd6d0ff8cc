use async_trait::async_trait;
use fleetwatch_domain::{DomainError, DomainResult, Vehicle, VehicleRegistry};
use tracing::debug;

use crate::client::PostgresClient;
use crate::models::VehicleRow;

const VEHICLE_COLUMNS: &str = "vehicle_id, plate_number, driver_name, route_name, api_key";

/// PostgreSQL implementation of the VehicleRegistry trait
#[derive(Clone)]
pub struct PostgresVehicleRegistry {
    client: PostgresClient,
}

impl PostgresVehicleRegistry {
    pub fn new(client: PostgresClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl VehicleRegistry for PostgresVehicleRegistry {
    async fn lookup(&self, vehicle_id: &str) -> DomainResult<Option<Vehicle>> {
        let conn = self
            .client
            .get_connection()
            .await
            .map_err(DomainError::StoreError)?;

        let query = format!("SELECT {VEHICLE_COLUMNS} FROM vehicles WHERE vehicle_id = $1");
        let row = conn
            .query_opt(query.as_str(), &[&vehicle_id])
            .await
            .map_err(|e| DomainError::StoreError(e.into()))?;

        Ok(row.map(|row| VehicleRow::from_row(&row).into()))
    }

    async fn upsert(&self, vehicle: Vehicle) -> DomainResult<Vehicle> {
        let conn = self
            .client
            .get_connection()
            .await
            .map_err(DomainError::StoreError)?;

        conn.execute(
            "INSERT INTO vehicles (vehicle_id, plate_number, driver_name, route_name, api_key) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (vehicle_id) DO UPDATE SET \
                plate_number = EXCLUDED.plate_number, \
                driver_name = EXCLUDED.driver_name, \
                route_name = EXCLUDED.route_name, \
                api_key = EXCLUDED.api_key",
            &[
                &vehicle.vehicle_id,
                &vehicle.plate_number,
                &vehicle.driver_name,
                &vehicle.route_name,
                &vehicle.api_key,
            ],
        )
        .await
        .map_err(|e| DomainError::StoreError(e.into()))?;

        debug!(vehicle_id = %vehicle.vehicle_id, "upserted vehicle");
        Ok(vehicle)
    }

    async fn insert_if_missing(&self, vehicle: Vehicle) -> DomainResult<Vehicle> {
        let conn = self
            .client
            .get_connection()
            .await
            .map_err(DomainError::StoreError)?;

        conn.execute(
            "INSERT INTO vehicles (vehicle_id, plate_number, driver_name, route_name, api_key) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (vehicle_id) DO NOTHING",
            &[
                &vehicle.vehicle_id,
                &vehicle.plate_number,
                &vehicle.driver_name,
                &vehicle.route_name,
                &vehicle.api_key,
            ],
        )
        .await
        .map_err(|e| DomainError::StoreError(e.into()))?;

        Ok(vehicle)
    }

    async fn list_all(&self) -> DomainResult<Vec<Vehicle>> {
        let conn = self
            .client
            .get_connection()
            .await
            .map_err(DomainError::StoreError)?;

        let query = format!("SELECT {VEHICLE_COLUMNS} FROM vehicles ORDER BY vehicle_id");
        let rows = conn
            .query(query.as_str(), &[])
            .await
            .map_err(|e| DomainError::StoreError(e.into()))?;

        debug!(vehicle_count = rows.len(), "listed vehicles");

        Ok(rows
            .iter()
            .map(|row| VehicleRow::from_row(row).into())
            .collect())
    }
}
