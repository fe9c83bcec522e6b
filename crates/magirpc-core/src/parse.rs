//! Lenient numeric parsing for daemon and price-source payloads.
//!
//! Magi daemons (and the price APIs) are inconsistent about whether numbers
//! arrive as JSON numbers or as strings, so every numeric field goes through
//! these helpers. Missing or unparsable values are hard errors; nothing here
//! defaults silently.

use serde::{Deserialize, Deserializer};

use crate::error::RpcError;

pub(crate) fn parse_f64(value: Option<&serde_json::Value>, field: &str) -> Result<f64, RpcError> {
    let value = value
        .filter(|v| !v.is_null())
        .ok_or_else(|| RpcError::InvalidResponse(format!("missing {field}")))?;

    let parsed = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(n) if n.is_finite() => Ok(n),
        _ => Err(RpcError::InvalidResponse(format!(
            "invalid {field}: {value}"
        ))),
    }
}

pub(crate) fn parse_u64(value: Option<&serde_json::Value>, field: &str) -> Result<u64, RpcError> {
    let value = value
        .filter(|v| !v.is_null())
        .ok_or_else(|| RpcError::InvalidResponse(format!("missing {field}")))?;

    let parsed = match value {
        serde_json::Value::Number(n) => n.as_u64(),
        serde_json::Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };

    parsed.ok_or_else(|| RpcError::InvalidResponse(format!("invalid {field}: {value}")))
}

/// `deserialize_with` adapter accepting a number or a numeric string.
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    parse_f64(Some(&value), "number").map_err(serde::de::Error::custom)
}
