//! Address / account-label resolution.
//!
//! The node identifies wallets either by address or by account label and the
//! façade accepts both everywhere. The only discriminator is length: an
//! identifier of exactly [`ADDRESS_LENGTH`] characters is an address,
//! anything else is a label. Node behaviour depends on this convention, so
//! it is not replaced with real address validation.

use crate::error::{CoreError, Operation, RpcError, UpstreamContext};
use crate::service::WalletService;

/// Length of a Magi base58 address.
pub const ADDRESS_LENGTH: usize = 34;

pub fn is_address(identifier: &str) -> bool {
    identifier.chars().count() == ADDRESS_LENGTH
}

impl WalletService {
    /// Return the account label owning `identifier` if it is an address,
    /// otherwise return `identifier` unchanged.
    ///
    /// An address the wallet does not know resolves to whatever the node
    /// reports, which is the default `""` account on bitcoind-derived nodes.
    pub async fn get_account_name(&self, identifier: &str) -> Result<String, CoreError> {
        self.resolve_label(identifier)
            .await
            .during(Operation::GetAccountName)
    }

    /// Return the first address under `identifier` if it is a label,
    /// otherwise return `identifier` unchanged.
    pub async fn get_account_address(&self, identifier: &str) -> Result<String, CoreError> {
        if is_address(identifier) {
            return Ok(identifier.to_owned());
        }

        let addresses = self
            .rpc
            .get_addresses_by_account(identifier)
            .await
            .during(Operation::GetAccountAddress)?;

        addresses
            .into_iter()
            .next()
            .ok_or_else(|| CoreError::NotFound(identifier.to_owned()))
    }

    pub(crate) async fn resolve_label(&self, identifier: &str) -> Result<String, RpcError> {
        if is_address(identifier) {
            self.rpc.get_account(identifier).await
        } else {
            Ok(identifier.to_owned())
        }
    }
}
