//! Price-source collaborator.
//!
//! The aggregator only needs "GET this URL and give me JSON", so the seam is
//! the [`PriceFeed`] trait. [`HttpPriceFeed`] is the `reqwest` implementation.

mod http;
#[cfg(test)]
pub mod mock;

pub use http::HttpPriceFeed;

use async_trait::async_trait;

use crate::error::RpcError;

pub const DEFAULT_COIN_ID: &str = "bitcoin";
pub const DEFAULT_PRIMARY_URL: &str =
    "https://api.coingecko.com/api/v3/simple/price?ids=bitcoin&vs_currencies=usd";
pub const DEFAULT_MARKET_NAME: &str = "btcpop";
pub const DEFAULT_MARKET_URL: &str = "https://btcpop.co/api/market-public.php";
pub const DEFAULT_MARKET_TICKER: &str = "XMG";

#[async_trait]
pub trait PriceFeed: Send + Sync {
    async fn fetch_json(&self, url: &str) -> Result<serde_json::Value, RpcError>;
}

/// Where prices come from.
///
/// The primary source quotes the reference coin in USD
/// (`{ <coin_id>: { "usd": n } }`). Each market lists trade records with a
/// `ticker` and a `lastTradePrice` denominated in the reference coin.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSources {
    pub coin_id: String,
    pub primary_url: String,
    pub markets: Vec<MarketSource>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarketSource {
    pub name: String,
    pub url: String,
    pub ticker: String,
}

impl Default for PriceSources {
    fn default() -> Self {
        Self {
            coin_id: DEFAULT_COIN_ID.to_owned(),
            primary_url: DEFAULT_PRIMARY_URL.to_owned(),
            markets: vec![MarketSource {
                name: DEFAULT_MARKET_NAME.to_owned(),
                url: DEFAULT_MARKET_URL.to_owned(),
                ticker: DEFAULT_MARKET_TICKER.to_owned(),
            }],
        }
    }
}
