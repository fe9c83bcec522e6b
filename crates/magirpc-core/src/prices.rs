use futures::future::join_all;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::{debug, warn};

use crate::error::{CoreError, Operation, RpcError, UpstreamContext};
use crate::parse::parse_f64;
use crate::price::MarketSource;
use crate::service::WalletService;

/// Key of the synthesized best-price entry in a serialized [`PriceBook`].
pub const MAX_KEY: &str = "max";

// ==============================================================================
// Price Book
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceQuote {
    pub source: String,
    pub value: f64,
}

/// Per-market USD quotes plus the best of them.
///
/// Entries keep the order the markets were configured in; that order is also
/// the tie-break when two markets quote exactly the same value. Serializes as
/// `{ "<source>": value, ..., "max": value }`.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBook {
    entries: Vec<PriceQuote>,
    max: f64,
}

impl PriceBook {
    pub fn from_quotes(entries: Vec<PriceQuote>) -> Self {
        let max = best_quote(&entries).map_or(0.0, |q| q.value);
        Self { entries, max }
    }

    pub fn entries(&self) -> &[PriceQuote] {
        &self.entries
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// The source holding the best quote, `None` for an empty book.
    pub fn best_source(&self) -> Option<&str> {
        best_quote(&self.entries).map(|q| q.source.as_str())
    }

    pub fn get(&self, source: &str) -> Option<f64> {
        if source == MAX_KEY {
            return Some(self.max);
        }
        self.entries
            .iter()
            .find(|q| q.source == source)
            .map(|q| q.value)
    }
}

/// Greatest value, first-seen wins on exact ties.
fn best_quote(entries: &[PriceQuote]) -> Option<&PriceQuote> {
    entries.iter().fold(None, |best, quote| match best {
        Some(current) if current.value >= quote.value => Some(current),
        _ => Some(quote),
    })
}

impl Serialize for PriceBook {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len() + 1))?;
        for quote in &self.entries {
            map.serialize_entry(&quote.source, &quote.value)?;
        }
        map.serialize_entry(MAX_KEY, &self.max)?;
        map.end()
    }
}

// ==============================================================================
// Aggregation
// ==============================================================================

impl WalletService {
    /// Quote the coin in USD on every configured market.
    ///
    /// The reference rate is mandatory. Markets are best effort: a market that
    /// is unreachable, malformed or lacks the ticker is logged and quoted at
    /// zero.
    pub async fn get_price(&self) -> Result<PriceBook, CoreError> {
        let markets = &self.sources.markets;
        let (reference, payloads) = tokio::join!(
            self.fetch_reference_rate(),
            join_all(
                markets
                    .iter()
                    .map(|market| self.price_feed.fetch_json(&market.url))
            )
        );
        let reference = reference.during(Operation::GetPrice)?;
        debug!(
            price.coin = %self.sources.coin_id,
            price.usd = reference,
            "reference rate"
        );

        let quotes = markets
            .iter()
            .zip(payloads)
            .map(|(market, payload)| {
                let value = payload
                    .and_then(|body| last_trade_price(&body, market))
                    .map(|last| last * reference)
                    .unwrap_or_else(|err| {
                        warn!(
                            price.source = %market.name,
                            error = %err,
                            "price source unavailable; quoting zero"
                        );
                        0.0
                    });
                PriceQuote {
                    source: market.name.clone(),
                    value,
                }
            })
            .collect();

        Ok(PriceBook::from_quotes(quotes))
    }

    async fn fetch_reference_rate(&self) -> Result<f64, RpcError> {
        let coin = &self.sources.coin_id;
        let body = self.price_feed.fetch_json(&self.sources.primary_url).await?;
        parse_f64(
            body.get(coin).and_then(|quote| quote.get("usd")),
            &format!("{coin}.usd"),
        )
    }
}

fn last_trade_price(body: &serde_json::Value, market: &MarketSource) -> Result<f64, RpcError> {
    let records = body.as_array().ok_or_else(|| {
        RpcError::InvalidResponse(format!("{} did not return a market list", market.name))
    })?;
    let record = records
        .iter()
        .find(|r| r.get("ticker").and_then(serde_json::Value::as_str) == Some(&market.ticker))
        .ok_or_else(|| {
            RpcError::InvalidResponse(format!("{} lists no {} market", market.name, market.ticker))
        })?;
    parse_f64(record.get("lastTradePrice"), "lastTradePrice")
}
