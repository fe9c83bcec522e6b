//! Shared test helpers for `magirpc-core` unit tests.
//!
//! Builds a [`WalletService`] over the in-memory mocks so that tests across
//! modules share one way of wiring the façade.

use std::sync::Arc;

use crate::price::mock::MockPriceFeed;
use crate::price::{MarketSource, PriceSources};
use crate::rpc::mock::{MockRpc, MockRpcBuilder};
use crate::service::WalletService;

pub const PRIMARY_URL: &str = "mock://primary";
pub const MARKET_URL: &str = "mock://btcpop";

/// A canonical-length address made of one repeated character.
pub fn address(c: char) -> String {
    std::iter::repeat(c).take(34).collect()
}

/// Price sources pointing at the mock URLs: one primary, one `btcpop` market
/// quoting `XMG`.
pub fn mock_sources() -> PriceSources {
    PriceSources {
        coin_id: "bitcoin".to_owned(),
        primary_url: PRIMARY_URL.to_owned(),
        markets: vec![MarketSource {
            name: "btcpop".to_owned(),
            url: MARKET_URL.to_owned(),
            ticker: "XMG".to_owned(),
        }],
    }
}

/// Wire a service over `rpc` with no reachable price sources.
pub fn service_with(rpc: MockRpcBuilder) -> (WalletService, Arc<MockRpc>) {
    service_with_prices(rpc, MockPriceFeed::new(), mock_sources())
}

pub fn service_with_prices(
    rpc: MockRpcBuilder,
    feed: MockPriceFeed,
    sources: PriceSources,
) -> (WalletService, Arc<MockRpc>) {
    let rpc = Arc::new(rpc.build());
    let service = WalletService::new(rpc.clone(), Arc::new(feed), sources);
    (service, rpc)
}
