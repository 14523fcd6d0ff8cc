mod credential_gate;
mod ingestion_service;
mod query_service;
mod vehicle_directory;

pub use credential_gate::CredentialGate;
pub use ingestion_service::TelemetryIngestionService;
pub use query_service::{TelemetryQueryService, DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT};
pub use vehicle_directory::{VehicleDirectoryService, VehicleRegistration};
