use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Missing API key")]
    MissingApiKey,

    #[error("No telemetry provided")]
    EmptyBatch,

    #[error("Batch telemetry must belong to a single vehicle")]
    MixedVehicleBatch,

    #[error("Unknown vehicle or invalid API key")]
    InvalidApiKey,

    #[error("Invalid time range: {0}")]
    InvalidRange(String),

    #[error("No telemetry found for vehicle {0}")]
    TelemetryNotFound(String),

    #[error("Store error: {0}")]
    StoreError(#[from] anyhow::Error),
}
