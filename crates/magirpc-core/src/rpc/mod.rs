//! Magi node RPC abstraction layer.
//!
//! Defines the [`NodeRpc`] trait and provides an HTTP JSON-RPC
//! implementation ([`HttpRpcClient`]) plus a test mock (`mock::MockRpc`).

mod http_adapter;
#[cfg(test)]
pub mod mock;
pub mod types;

pub use http_adapter::HttpRpcClient;
pub use types::{MiningInfo, ReceivedByAddress, WalletTransaction};

use async_trait::async_trait;

use crate::error::RpcError;

/// The wallet RPC methods of the node that the façade relies on.
///
/// Implementations own authentication, connection management and response
/// decoding. They must not retry or reinterpret results; the façade applies
/// its own business rules on top.
#[async_trait]
pub trait NodeRpc: Send + Sync {
    /// `listreceivedbyaddress minconf includeempty`
    async fn list_received_by_address(
        &self,
        min_confirmations: u32,
        include_empty: bool,
    ) -> Result<Vec<ReceivedByAddress>, RpcError>;

    /// `getaccount address`
    async fn get_account(&self, address: &str) -> Result<String, RpcError>;

    /// `getaddressesbyaccount label`
    async fn get_addresses_by_account(&self, label: &str) -> Result<Vec<String>, RpcError>;

    /// `listtransactions [label [count]]`. A `count` without a label is
    /// ignored, matching the positional RPC signature.
    async fn list_transactions(
        &self,
        label: Option<&str>,
        count: Option<usize>,
    ) -> Result<Vec<WalletTransaction>, RpcError>;

    /// `getnewaddress label`
    async fn get_new_address(&self, label: &str) -> Result<String, RpcError>;

    /// `settxfee amount`. This changes a node-wide setting; see
    /// [`crate::fee::NodeFee`].
    async fn set_tx_fee(&self, fee: f64) -> Result<bool, RpcError>;

    /// `sendfrom label recipient amount minconf comment`, returning the txid.
    async fn send_from(
        &self,
        label: &str,
        recipient: &str,
        amount: f64,
        min_confirmations: u32,
        memo: &str,
    ) -> Result<String, RpcError>;

    async fn get_mining_info(&self) -> Result<MiningInfo, RpcError>;

    async fn get_connection_count(&self) -> Result<u64, RpcError>;

    /// `getbalance [label [minconf]]`. A `min_confirmations` without a label
    /// is ignored.
    async fn get_balance(
        &self,
        label: Option<&str>,
        min_confirmations: Option<u32>,
    ) -> Result<f64, RpcError>;
}
