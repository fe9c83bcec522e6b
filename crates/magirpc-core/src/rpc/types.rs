//! Shapes returned by the node's wallet RPC methods.

use serde::{Deserialize, Serialize};

use crate::parse::lenient_f64;

// ==============================================================================
// Wallet Listing
// ==============================================================================

/// One row of `listreceivedbyaddress`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceivedByAddress {
    pub address: String,
    #[serde(default)]
    pub account: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub amount: f64,
    #[serde(default)]
    pub confirmations: u64,
}

// ==============================================================================
// Transactions
// ==============================================================================

/// One row of `listtransactions`. Fields the façade does not interpret are
/// kept in `extra` so callers see the full node record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletTransaction {
    #[serde(default)]
    pub account: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    pub category: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub amount: f64,
    #[serde(default)]
    pub confirmations: Option<i64>,
    #[serde(default)]
    pub txid: Option<String>,
    #[serde(default)]
    pub time: Option<u64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ==============================================================================
// Mining Info
// ==============================================================================

/// Raw `getmininginfo` record.
///
/// Field names and value types vary between daemon versions, so the record is
/// kept as an untyped JSON object and normalized by the statistics module.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct MiningInfo(pub serde_json::Map<String, serde_json::Value>);

impl MiningInfo {
    pub fn get(&self, field: &str) -> Option<&serde_json::Value> {
        self.0.get(field)
    }
}
