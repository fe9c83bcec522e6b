use std::time::Duration;

use async_trait::async_trait;
use reqwest::header;
use tracing::{debug, trace};

use crate::error::{CoreError, RpcError};

use super::PriceFeed;

/// Plain HTTP GET price feed. Non-2xx responses are failures.
pub struct HttpPriceFeed {
    client: reqwest::Client,
}

impl HttpPriceFeed {
    pub fn new() -> Result<Self, CoreError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(10))
            .user_agent(concat!("magirpc/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CoreError::Config(format!("build price http client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PriceFeed for HttpPriceFeed {
    async fn fetch_json(&self, url: &str) -> Result<serde_json::Value, RpcError> {
        debug!(price.url = url, "price request");
        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(price.url = url, %status, body_len = body.len(), "price response");
        trace!(price.url = url, body = %body, "price response body");

        if !status.is_success() {
            return Err(RpcError::ServerError {
                code: i64::from(status.as_u16()),
                message: format!("price source {url} returned HTTP {status}"),
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| RpcError::InvalidResponse(format!("decode price response from {url}: {e}")))
    }
}
