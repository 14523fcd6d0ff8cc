use crate::client::PostgresClient;
use anyhow::{Context, Result};
use fleetwatch_domain::{Vehicle, VehicleRegistry};
use tracing::info;
use uuid::{uuid, Uuid};

const BUS_1_API_KEY: Uuid = uuid!("7b0c3c0f-2f0a-4f93-9f3e-5c7e0c123001");
const BUS_2_API_KEY: Uuid = uuid!("8e9a7b2d-1a23-4c45-8f17-03fa5a5f5b02");
const BUS_3_API_KEY: Uuid = uuid!("0a815d8a-7cb2-4fba-8e44-9c3d5adcf603");

/// Provision the vehicles table if it does not exist yet.
pub async fn ensure_schema(client: &PostgresClient) -> Result<()> {
    let conn = client.get_connection().await?;
    conn.execute(
        "CREATE TABLE IF NOT EXISTS vehicles (\
            vehicle_id TEXT PRIMARY KEY, \
            plate_number TEXT, \
            driver_name TEXT, \
            route_name TEXT, \
            api_key UUID NOT NULL\
        )",
        &[],
    )
    .await
    .context("failed to provision vehicles table")?;

    info!("vehicles table ready");
    Ok(())
}

/// The fixed bootstrap fleet with its deterministic api keys.
///
/// Keys for these three vehicles never change across restarts; any other
/// vehicle added through the registry gets a random key at creation time.
pub fn default_seed_vehicles() -> Vec<Vehicle> {
    vec![
        Vehicle {
            vehicle_id: "bus-1".to_string(),
            plate_number: Some("ABC-001".to_string()),
            driver_name: Some("Majd".to_string()),
            route_name: Some("North Route".to_string()),
            api_key: BUS_1_API_KEY,
        },
        Vehicle {
            vehicle_id: "bus-2".to_string(),
            plate_number: Some("ABC-002".to_string()),
            driver_name: Some("Raymo".to_string()),
            route_name: Some("South Route".to_string()),
            api_key: BUS_2_API_KEY,
        },
        Vehicle {
            vehicle_id: "bus-3".to_string(),
            plate_number: Some("ABC-003".to_string()),
            driver_name: Some("Robert".to_string()),
            route_name: Some("East Route".to_string()),
            api_key: BUS_3_API_KEY,
        },
    ]
}

/// Insert the bootstrap fleet, leaving already-registered vehicles untouched.
pub async fn seed_default_vehicles(registry: &dyn VehicleRegistry) -> Result<()> {
    for vehicle in default_seed_vehicles() {
        let vehicle_id = vehicle.vehicle_id.clone();
        registry
            .insert_if_missing(vehicle)
            .await
            .with_context(|| format!("failed to seed vehicle {vehicle_id}"))?;
    }
    info!("default vehicles seeded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_fleet_is_three_vehicles_with_stable_keys() {
        let seeds = default_seed_vehicles();
        assert_eq!(seeds.len(), 3);
        assert_eq!(seeds[0].vehicle_id, "bus-1");
        assert_eq!(
            seeds[0].api_key.to_string(),
            "7b0c3c0f-2f0a-4f93-9f3e-5c7e0c123001"
        );
        // Seeding twice must produce identical credentials
        assert_eq!(default_seed_vehicles(), default_seed_vehicles());
    }
}
