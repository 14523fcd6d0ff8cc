use crate::error::{DomainError, DomainResult};
use crate::telemetry::{RawTelemetry, TelemetrySample};
use crate::validate::validate_struct;
use chrono::Utc;

/// Convert an untrusted payload into a normalized sample.
///
/// Trims the vehicle id, enforces field ranges, rounds coordinates to 6
/// decimal places and temperature to 2, and defaults a missing timestamp to
/// the current instant. Pure apart from reading the clock for the default;
/// the only failure mode is `ValidationError`.
pub fn normalize(raw: RawTelemetry) -> DomainResult<TelemetrySample> {
    let vehicle_id = raw.vehicle_id.trim().to_string();
    if vehicle_id.is_empty() {
        return Err(DomainError::ValidationError(
            "vehicle_id must not be empty".into(),
        ));
    }

    let trimmed = RawTelemetry {
        vehicle_id: vehicle_id.clone(),
        ..raw.clone()
    };
    validate_struct(&trimmed)?;

    Ok(TelemetrySample {
        vehicle_id,
        latitude: round_to(raw.latitude, 6),
        longitude: round_to(raw.longitude, 6),
        cabin_temperature_c: round_to(raw.cabin_temperature_c, 2),
        smoke_detected: raw.smoke_detected,
        timestamp: raw.timestamp.unwrap_or_else(Utc::now),
    })
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
