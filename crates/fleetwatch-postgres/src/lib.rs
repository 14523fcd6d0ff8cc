mod client;
mod models;
mod seed;
mod vehicle_registry;

pub use client::PostgresClient;
pub use models::VehicleRow;
pub use seed::{default_seed_vehicles, ensure_schema, seed_default_vehicles};
pub use vehicle_registry::PostgresVehicleRegistry;
