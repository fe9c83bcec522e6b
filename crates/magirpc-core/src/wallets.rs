use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::info;

use crate::error::{CoreError, Operation, RpcError, UpstreamContext};
use crate::rpc::ReceivedByAddress;
use crate::service::WalletService;

/// Number of hex characters in a generated wallet label.
pub const GENERATED_LABEL_LEN: usize = 8;

/// A freshly minted address and the label it was created under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    pub address: String,
    pub label: String,
}

/// Short lowercase-hex label for wallets created without one.
///
/// Labels are a UI convenience, not a secret; they only need to be unlikely
/// to collide with each other.
pub fn generate_label() -> String {
    let seed: i32 = rand::thread_rng().gen_range(-999_999..999_999);
    let digest = Sha256::digest(seed.to_string().as_bytes());
    let mut label = hex::encode(digest);
    label.truncate(GENERATED_LABEL_LEN);
    label
}

impl WalletService {
    /// Every address the node has received to, including never-used ones.
    pub async fn get_wallets(&self) -> Result<Vec<ReceivedByAddress>, CoreError> {
        self.list_wallets().await.during(Operation::GetWallets)
    }

    /// Exact, case-sensitive match of `identifier` against every wallet's
    /// address and label.
    pub async fn wallet_exists(&self, identifier: &str) -> Result<bool, CoreError> {
        self.wallet_exists_raw(identifier)
            .await
            .during(Operation::WalletExists)
    }

    /// Create a wallet under `label`, or under a generated label when none
    /// (or an empty one) is given.
    ///
    /// The existence check and `getnewaddress` are two separate node calls.
    /// Two callers racing on the same label can both pass the check; the node
    /// offers no primitive to make this atomic, so callers that need
    /// exclusivity must serialize creation per label themselves.
    pub async fn create_wallet(&self, label: Option<&str>) -> Result<Wallet, CoreError> {
        let label = match label.filter(|l| !l.is_empty()) {
            Some(label) => label.to_owned(),
            None => generate_label(),
        };

        if self
            .wallet_exists_raw(&label)
            .await
            .during(Operation::CreateWallet)?
        {
            return Err(CoreError::Conflict(label));
        }

        let address = self
            .rpc
            .get_new_address(&label)
            .await
            .during(Operation::CreateWallet)?;
        info!(wallet.label = %label, wallet.address = %address, "created wallet");

        Ok(Wallet { address, label })
    }

    async fn list_wallets(&self) -> Result<Vec<ReceivedByAddress>, RpcError> {
        self.rpc.list_received_by_address(0, true).await
    }

    async fn wallet_exists_raw(&self, identifier: &str) -> Result<bool, RpcError> {
        let wallets = self.list_wallets().await?;
        Ok(wallets
            .iter()
            .any(|w| w.address == identifier || w.account == identifier))
    }
}
