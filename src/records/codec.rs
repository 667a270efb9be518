//! Serde adapters for wire formats the API expects.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Money amounts as JSON numbers with two decimal places.
///
/// `0.00` encodes as `0.0`, `1234.50` as `1234.5`. The value is computed as
/// mantissa / 10^scale so the result is the closest `f64` to the decimal.
pub mod amount {
    use super::*;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(to_f64(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        let raw = f64::deserialize(deserializer)?;
        from_f64(raw).map_err(serde::de::Error::custom)
    }

    /// Closest `f64` to a two-place decimal.
    pub fn to_f64(value: &Decimal) -> f64 {
        let rounded = value.round_dp(2);
        rounded.mantissa() as f64 / 10f64.powi(rounded.scale() as i32)
    }

    /// Exact decimal for the shortest text form of `raw`.
    pub fn from_f64(raw: f64) -> Result<Decimal, String> {
        let text = raw.to_string();
        Decimal::from_str(&text)
            .or_else(|_| Decimal::from_scientific(&text))
            .map_err(|e| format!("invalid amount {}: {}", text, e))
    }
}

/// Booking slot times as `HH:MM`.
pub mod slot_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(value: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}
