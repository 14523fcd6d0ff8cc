use fleetwatch_domain::Vehicle;
use tokio_postgres::Row;
use uuid::Uuid;

/// One row of the `vehicles` table.
#[derive(Debug, Clone)]
pub struct VehicleRow {
    pub vehicle_id: String,
    pub plate_number: Option<String>,
    pub driver_name: Option<String>,
    pub route_name: Option<String>,
    pub api_key: Uuid,
}

impl VehicleRow {
    /// Expects columns in the order selected by the registry queries:
    /// vehicle_id, plate_number, driver_name, route_name, api_key.
    pub fn from_row(row: &Row) -> Self {
        VehicleRow {
            vehicle_id: row.get(0),
            plate_number: row.get(1),
            driver_name: row.get(2),
            route_name: row.get(3),
            api_key: row.get(4),
        }
    }
}

impl From<VehicleRow> for Vehicle {
    fn from(row: VehicleRow) -> Self {
        Vehicle {
            vehicle_id: row.vehicle_id,
            plate_number: row.plate_number,
            driver_name: row.driver_name,
            route_name: row.route_name,
            api_key: row.api_key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_converts_to_domain_vehicle() {
        let row = VehicleRow {
            vehicle_id: "bus-1".to_string(),
            plate_number: Some("ABC-001".to_string()),
            driver_name: None,
            route_name: Some("North Route".to_string()),
            api_key: Uuid::nil(),
        };
        let vehicle: Vehicle = row.into();
        assert_eq!(vehicle.vehicle_id, "bus-1");
        assert_eq!(vehicle.plate_number.as_deref(), Some("ABC-001"));
        assert!(vehicle.driver_name.is_none());
    }
}
