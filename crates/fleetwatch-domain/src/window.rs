use crate::error::{DomainError, DomainResult};
use std::fmt;
use std::str::FromStr;

/// A trailing aggregation window, e.g. "15m", "1h" or "24h".
///
/// Only the fixed grammar `<digits><s|m|h|d>` is accepted; anything else is
/// rejected before a query is ever built from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSpec {
    raw: String,
    seconds: u64,
}

impl WindowSpec {
    pub fn parse(value: &str) -> DomainResult<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::ValidationError("window is required".into()));
        }
        trimmed.parse()
    }

    /// Window length in whole seconds.
    pub fn as_seconds(&self) -> u64 {
        self.seconds
    }

    /// The specifier as given by the caller, trimmed.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl FromStr for WindowSpec {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid =
            || DomainError::ValidationError(format!("invalid window specifier: {value}"));

        // Split before the final character; char_indices keeps this safe for
        // non-ASCII input, which is then rejected by the unit match below.
        let unit_index = value.char_indices().last().map(|(i, _)| i).unwrap_or(0);
        let (digits, unit) = value.split_at(unit_index);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let magnitude: u64 = digits.parse().map_err(|_| invalid())?;
        if magnitude == 0 {
            return Err(invalid());
        }
        let per_unit = match unit {
            "s" => 1,
            "m" => 60,
            "h" => 3_600,
            "d" => 86_400,
            _ => return Err(invalid()),
        };
        let seconds = magnitude.checked_mul(per_unit).ok_or_else(invalid)?;

        Ok(Self {
            raw: value.to_string(),
            seconds,
        })
    }
}

impl fmt::Display for WindowSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
