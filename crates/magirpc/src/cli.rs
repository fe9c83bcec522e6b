use std::collections::HashSet;
use std::path::PathBuf;

use clap::Parser;
use eyre::{bail, eyre};

use magirpc_core::price::{
    MarketSource, PriceSources, DEFAULT_COIN_ID, DEFAULT_MARKET_NAME, DEFAULT_MARKET_TICKER,
    DEFAULT_MARKET_URL, DEFAULT_PRIMARY_URL,
};
use magirpc_core::prices::MAX_KEY;

/// magirpc: REST front-end for a Magi node wallet.
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Magi daemon RPC URL.
    #[arg(long, default_value = "http://127.0.0.1:8232", env = "MAGIRPC_RPC_URL")]
    pub rpc_url: String,

    /// RPC username.
    #[arg(long, env = "MAGIRPC_RPC_USER")]
    pub rpc_user: Option<String>,

    /// RPC password.
    #[arg(long, env = "MAGIRPC_RPC_PASS")]
    pub rpc_pass: Option<String>,

    /// Cookie file holding `user:password`, used when no user/pass is given.
    #[arg(long, env = "MAGIRPC_RPC_COOKIE_FILE")]
    pub rpc_cookie_file: Option<PathBuf>,

    /// Upper bound on outbound RPC requests per second.
    #[arg(long, env = "MAGIRPC_RPC_REQUESTS_PER_SECOND")]
    pub rpc_requests_per_second: Option<u32>,

    /// Address to bind the web server to.
    #[arg(long, default_value = "127.0.0.1")]
    pub bind: String,

    /// Port to listen on.
    #[arg(long, default_value = "3090")]
    pub port: u16,

    /// Fixed API token. A random one is generated per run when omitted.
    #[arg(long, env = "MAGIRPC_API_TOKEN")]
    pub api_token: Option<String>,

    /// Coin id the reference price source quotes in USD.
    #[arg(long, default_value = DEFAULT_COIN_ID, env = "MAGIRPC_PRICE_COIN")]
    pub price_coin: String,

    /// Reference price URL returning `{ <coin>: { "usd": n } }`.
    #[arg(long, default_value = DEFAULT_PRIMARY_URL, env = "MAGIRPC_PRICE_URL")]
    pub price_url: String,

    /// Market source as `name=url` (repeatable). Defaults to btcpop.
    #[arg(long = "market")]
    pub markets: Vec<String>,

    /// Ticker to look up on every market.
    #[arg(long, default_value = DEFAULT_MARKET_TICKER, env = "MAGIRPC_MARKET_TICKER")]
    pub market_ticker: String,
}

impl Cli {
    pub fn price_sources(&self) -> eyre::Result<PriceSources> {
        let markets = if self.markets.is_empty() {
            vec![MarketSource {
                name: DEFAULT_MARKET_NAME.to_owned(),
                url: DEFAULT_MARKET_URL.to_owned(),
                ticker: self.market_ticker.clone(),
            }]
        } else {
            parse_markets(&self.markets, &self.market_ticker)?
        };

        Ok(PriceSources {
            coin_id: self.price_coin.clone(),
            primary_url: self.price_url.clone(),
            markets,
        })
    }
}

fn parse_markets(entries: &[String], ticker: &str) -> eyre::Result<Vec<MarketSource>> {
    let mut seen = HashSet::new();
    let mut markets = Vec::with_capacity(entries.len());
    for entry in entries {
        let (name, url) = entry
            .split_once('=')
            .ok_or_else(|| eyre!("market `{entry}` must be given as name=url"))?;
        let (name, url) = (name.trim(), url.trim());
        if name.is_empty() || url.is_empty() {
            bail!("market `{entry}` must have a non-empty name and url");
        }
        if name == MAX_KEY {
            bail!("market name `{MAX_KEY}` is reserved for the best price");
        }
        if !seen.insert(name.to_owned()) {
            bail!("market `{name}` given more than once");
        }
        markets.push(MarketSource {
            name: name.to_owned(),
            url: url.to_owned(),
            ticker: ticker.to_owned(),
        });
    }
    Ok(markets)
}
