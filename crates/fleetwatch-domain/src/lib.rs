mod error;
mod normalize;
mod telemetry;
mod time;
mod validate;
mod vehicle;
mod window;

pub use error::{DomainError, DomainResult};
pub use normalize::normalize;
pub use telemetry::{
    RawTelemetry, TelemetryAggregates, TelemetrySample, TelemetryStore, TemperatureSummary,
};
pub use time::{flexible_timestamp, parse_instant};
pub use validate::validate_struct;
pub use vehicle::{Vehicle, VehicleRegistry};
pub use window::WindowSpec;

// Re-export mocks when the testing feature is enabled
#[cfg(any(test, feature = "testing"))]
pub use telemetry::MockTelemetryStore;
#[cfg(any(test, feature = "testing"))]
pub use vehicle::MockVehicleRegistry;
