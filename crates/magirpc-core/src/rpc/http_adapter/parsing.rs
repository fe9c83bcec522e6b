use serde::de::DeserializeOwned;

use crate::error::RpcError;
use crate::parse::{parse_f64, parse_u64};

/// Decode an RPC result into a typed value, naming the method on failure.
pub(super) fn decode_result<T: DeserializeOwned>(
    raw: serde_json::Value,
    method: &str,
) -> Result<T, RpcError> {
    serde_json::from_value(raw)
        .map_err(|e| RpcError::InvalidResponse(format!("invalid {method} result: {e}")))
}

pub(super) fn parse_string_result(raw: serde_json::Value, method: &str) -> Result<String, RpcError> {
    match raw {
        serde_json::Value::String(s) => Ok(s),
        other => Err(RpcError::InvalidResponse(format!(
            "invalid {method} result: expected string, got {other}"
        ))),
    }
}

pub(super) fn parse_bool_result(raw: serde_json::Value, method: &str) -> Result<bool, RpcError> {
    raw.as_bool().ok_or_else(|| {
        RpcError::InvalidResponse(format!("invalid {method} result: expected bool, got {raw}"))
    })
}

pub(super) fn parse_amount_result(raw: serde_json::Value, method: &str) -> Result<f64, RpcError> {
    parse_f64(Some(&raw), method)
}

pub(super) fn parse_count_result(raw: serde_json::Value, method: &str) -> Result<u64, RpcError> {
    parse_u64(Some(&raw), method)
}
