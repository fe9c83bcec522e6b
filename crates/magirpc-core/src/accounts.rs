use crate::error::{CoreError, Operation, UpstreamContext};
use crate::rpc::WalletTransaction;
use crate::service::WalletService;

pub const DEFAULT_TRANSACTION_LIMIT: usize = 10;

/// Confirmations required for a per-account balance.
const BALANCE_MIN_CONFIRMATIONS: u32 = 1;

impl WalletService {
    /// Most recent transactions of the account behind `identifier`.
    ///
    /// An empty identifier names no account and yields an empty list without
    /// asking the node.
    pub async fn get_transactions(
        &self,
        identifier: &str,
        limit: usize,
    ) -> Result<Vec<WalletTransaction>, CoreError> {
        if identifier.is_empty() {
            return Ok(Vec::new());
        }
        let label = self
            .resolve_label(identifier)
            .await
            .during(Operation::GetTransactions)?;
        self.rpc
            .list_transactions(Some(&label), Some(limit))
            .await
            .during(Operation::GetTransactions)
    }

    /// Recent transactions across the wallet, with the node's default count.
    pub async fn get_all_transactions(&self) -> Result<Vec<WalletTransaction>, CoreError> {
        self.rpc
            .list_transactions(None, None)
            .await
            .during(Operation::GetTransactions)
    }

    /// Whole-wallet balance, or the confirmed balance of one account.
    pub async fn get_balance(&self, identifier: Option<&str>) -> Result<f64, CoreError> {
        let Some(identifier) = identifier else {
            return self
                .rpc
                .get_balance(None, None)
                .await
                .during(Operation::GetBalance);
        };

        let label = self
            .resolve_label(identifier)
            .await
            .during(Operation::GetBalance)?;
        self.rpc
            .get_balance(Some(&label), Some(BALANCE_MIN_CONFIRMATIONS))
            .await
            .during(Operation::GetBalance)
    }
}
