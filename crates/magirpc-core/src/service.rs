use std::sync::Arc;

use crate::fee::NodeFee;
use crate::price::{PriceFeed, PriceSources};
use crate::rpc::NodeRpc;

// ==============================================================================
// Wallet Service
// ==============================================================================

/// The façade over one node connection and a set of price sources.
///
/// Operations are spread across the resolver, wallet, transfer, price and
/// statistics modules as `impl WalletService` blocks. None of them keeps
/// state between calls; the only shared state is the node fee lock, which
/// mirrors a setting that lives on the node itself.
pub struct WalletService {
    pub(crate) rpc: Arc<dyn NodeRpc>,
    pub(crate) price_feed: Arc<dyn PriceFeed>,
    pub(crate) sources: PriceSources,
    pub(crate) fee: NodeFee,
}

impl WalletService {
    pub fn new(
        rpc: Arc<dyn NodeRpc>,
        price_feed: Arc<dyn PriceFeed>,
        sources: PriceSources,
    ) -> Self {
        Self {
            rpc,
            price_feed,
            sources,
            fee: NodeFee::new(),
        }
    }

    pub fn price_sources(&self) -> &PriceSources {
        &self.sources
    }

    pub fn node_fee(&self) -> &NodeFee {
        &self.fee
    }
}
