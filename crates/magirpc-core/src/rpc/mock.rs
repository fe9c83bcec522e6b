use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::RpcError;

use super::types::{MiningInfo, ReceivedByAddress, WalletTransaction};
use super::NodeRpc;

/// A call that mutates node state, recorded so tests can assert on side
/// effects (or their absence).
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    GetNewAddress(String),
    SetTxFee(f64),
    SendFrom {
        label: String,
        recipient: String,
        amount: f64,
        min_confirmations: u32,
        memo: String,
    },
    ListTransactions(Option<String>, Option<usize>),
    GetBalance(Option<String>, Option<u32>),
}

/// A mock node backend for testing. Serves canned wallet data populated via
/// the builder pattern and records state-changing calls.
pub struct MockRpc {
    wallets: Vec<ReceivedByAddress>,
    addresses_by_label: HashMap<String, Vec<String>>,
    transactions: Vec<WalletTransaction>,
    mining_info: MiningInfo,
    connections: u64,
    balances: HashMap<Option<String>, f64>,
    failing: Option<String>,
    next_address: AtomicU64,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockRpc {
    pub fn builder() -> MockRpcBuilder {
        MockRpcBuilder {
            wallets: Vec::new(),
            addresses_by_label: HashMap::new(),
            transactions: Vec::new(),
            mining_info: MiningInfo::default(),
            connections: 8,
            balances: HashMap::new(),
            failing: None,
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("mock call log poisoned").clone()
    }

    fn record(&self, call: RecordedCall) {
        self.calls.lock().expect("mock call log poisoned").push(call);
    }

    fn check(&self, method: &str) -> Result<(), RpcError> {
        match &self.failing {
            Some(failing) if failing == method || failing == "*" => Err(RpcError::ServerError {
                code: -1,
                message: format!("{method} unavailable"),
            }),
            _ => Ok(()),
        }
    }
}

pub struct MockRpcBuilder {
    wallets: Vec<ReceivedByAddress>,
    addresses_by_label: HashMap<String, Vec<String>>,
    transactions: Vec<WalletTransaction>,
    mining_info: MiningInfo,
    connections: u64,
    balances: HashMap<Option<String>, f64>,
    failing: Option<String>,
}

impl MockRpcBuilder {
    /// Register `address` under `label`, visible to both wallet listing and
    /// label/address lookups.
    pub fn with_wallet(mut self, address: &str, label: &str, amount: f64) -> Self {
        self.wallets.push(ReceivedByAddress {
            address: address.to_owned(),
            account: label.to_owned(),
            amount,
            confirmations: 1,
        });
        self.addresses_by_label
            .entry(label.to_owned())
            .or_default()
            .push(address.to_owned());
        self
    }

    pub fn with_transaction(mut self, tx: WalletTransaction) -> Self {
        self.transactions.push(tx);
        self
    }

    pub fn with_mining_info(mut self, info: serde_json::Value) -> Self {
        self.mining_info =
            serde_json::from_value(info).expect("mock mining info must be a JSON object");
        self
    }

    pub fn with_connections(mut self, connections: u64) -> Self {
        self.connections = connections;
        self
    }

    pub fn with_balance(mut self, label: Option<&str>, balance: f64) -> Self {
        self.balances.insert(label.map(str::to_owned), balance);
        self
    }

    /// Make the named RPC method (or every method, with `"*"`) fail.
    pub fn failing(mut self, method: &str) -> Self {
        self.failing = Some(method.to_owned());
        self
    }

    pub fn build(self) -> MockRpc {
        MockRpc {
            wallets: self.wallets,
            addresses_by_label: self.addresses_by_label,
            transactions: self.transactions,
            mining_info: self.mining_info,
            connections: self.connections,
            balances: self.balances,
            failing: self.failing,
            next_address: AtomicU64::new(0),
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl NodeRpc for MockRpc {
    async fn list_received_by_address(
        &self,
        _min_confirmations: u32,
        _include_empty: bool,
    ) -> Result<Vec<ReceivedByAddress>, RpcError> {
        self.check("listreceivedbyaddress")?;
        Ok(self.wallets.clone())
    }

    async fn get_account(&self, address: &str) -> Result<String, RpcError> {
        self.check("getaccount")?;
        // Like the daemon, an unknown address belongs to the default "" account.
        Ok(self
            .wallets
            .iter()
            .find(|w| w.address == address)
            .map(|w| w.account.clone())
            .unwrap_or_default())
    }

    async fn get_addresses_by_account(&self, label: &str) -> Result<Vec<String>, RpcError> {
        self.check("getaddressesbyaccount")?;
        Ok(self
            .addresses_by_label
            .get(label)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_transactions(
        &self,
        label: Option<&str>,
        count: Option<usize>,
    ) -> Result<Vec<WalletTransaction>, RpcError> {
        self.check("listtransactions")?;
        self.record(RecordedCall::ListTransactions(
            label.map(str::to_owned),
            count,
        ));
        let matching = self
            .transactions
            .iter()
            .filter(|tx| label.is_none() || tx.account.as_deref() == label)
            .take(count.unwrap_or(10))
            .cloned()
            .collect();
        Ok(matching)
    }

    async fn get_new_address(&self, label: &str) -> Result<String, RpcError> {
        self.check("getnewaddress")?;
        self.record(RecordedCall::GetNewAddress(label.to_owned()));
        let n = self.next_address.fetch_add(1, Ordering::Relaxed);
        Ok(format!("9{n:0>33}"))
    }

    async fn set_tx_fee(&self, fee: f64) -> Result<bool, RpcError> {
        self.check("settxfee")?;
        self.record(RecordedCall::SetTxFee(fee));
        Ok(true)
    }

    async fn send_from(
        &self,
        label: &str,
        recipient: &str,
        amount: f64,
        min_confirmations: u32,
        memo: &str,
    ) -> Result<String, RpcError> {
        self.check("sendfrom")?;
        self.record(RecordedCall::SendFrom {
            label: label.to_owned(),
            recipient: recipient.to_owned(),
            amount,
            min_confirmations,
            memo: memo.to_owned(),
        });
        Ok("ab".repeat(32))
    }

    async fn get_mining_info(&self) -> Result<MiningInfo, RpcError> {
        self.check("getmininginfo")?;
        Ok(self.mining_info.clone())
    }

    async fn get_connection_count(&self) -> Result<u64, RpcError> {
        self.check("getconnectioncount")?;
        Ok(self.connections)
    }

    async fn get_balance(
        &self,
        label: Option<&str>,
        min_confirmations: Option<u32>,
    ) -> Result<f64, RpcError> {
        self.check("getbalance")?;
        self.record(RecordedCall::GetBalance(
            label.map(str::to_owned),
            min_confirmations,
        ));
        Ok(self
            .balances
            .get(&label.map(str::to_owned))
            .copied()
            .unwrap_or(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn generated_addresses_have_canonical_length() {
        let rpc = MockRpc::builder().build();
        let first = rpc.get_new_address("a").await.expect("mock address");
        let second = rpc.get_new_address("b").await.expect("mock address");
        assert_eq!(first.len(), 34);
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn failing_method_only_affects_that_method() {
        let rpc = MockRpc::builder()
            .with_wallet(&"A".repeat(34), "alice", 1.0)
            .failing("getaccount")
            .build();
        assert!(rpc.get_account(&"A".repeat(34)).await.is_err());
        assert_eq!(
            rpc.list_received_by_address(0, true)
                .await
                .expect("listing still works")
                .len(),
            1
        );
    }
}
