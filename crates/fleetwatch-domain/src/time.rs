use crate::error::{DomainError, DomainResult};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

/// Parse a caller-supplied instant.
///
/// Accepts RFC 3339 with an explicit offset, or a naive timestamp which is
/// interpreted as UTC. Interpreting offset-less input as UTC (never local
/// time) is a deliberate policy shared by ingestion and the query path.
pub fn parse_instant(value: &str) -> DomainResult<DateTime<Utc>> {
    let trimmed = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    Err(DomainError::ValidationError(format!(
        "invalid timestamp: {trimmed}"
    )))
}

/// Serde helper for optional timestamps that may arrive without an offset.
pub mod flexible_timestamp {
    use super::parse_instant;
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            Some(value) => parse_instant(&value)
                .map(Some)
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}
