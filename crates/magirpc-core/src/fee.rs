//! The node's per-transaction fee.
//!
//! `settxfee` changes a setting on the node connection, not on a single
//! transfer. A transfer that sets its fee and then sends must therefore not
//! interleave with another transfer doing the same. [`NodeFee`] makes that
//! rule explicit: the fee can only be applied through a [`FeeGuard`], and only
//! one guard exists at a time per service.
//!
//! This only orders transfers issued through the same `WalletService`. Other
//! clients of the node can still change the fee between our `settxfee` and
//! `sendfrom`; isolating against them needs one node connection per sender.

use tokio::sync::{Mutex, MutexGuard};

use crate::error::RpcError;
use crate::rpc::NodeRpc;

#[derive(Debug, Default)]
pub struct NodeFee {
    applied: Mutex<Option<f64>>,
}

impl NodeFee {
    pub fn new() -> Self {
        Self::default()
    }

    /// The fee most recently applied through this service, if any.
    pub async fn last_applied(&self) -> Option<f64> {
        *self.applied.lock().await
    }

    /// Wait for exclusive use of the node fee. Hold the guard until the
    /// transfer that depends on the fee has been submitted.
    pub async fn acquire(&self) -> FeeGuard<'_> {
        FeeGuard {
            applied: self.applied.lock().await,
        }
    }
}

pub struct FeeGuard<'a> {
    applied: MutexGuard<'a, Option<f64>>,
}

impl FeeGuard<'_> {
    pub async fn apply(&mut self, rpc: &dyn NodeRpc, fee: f64) -> Result<(), RpcError> {
        if !rpc.set_tx_fee(fee).await? {
            return Err(RpcError::InvalidResponse(format!(
                "node refused settxfee {fee}"
            )));
        }
        *self.applied = Some(fee);
        Ok(())
    }
}
