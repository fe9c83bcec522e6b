use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::RpcError;

use super::PriceFeed;

/// Serves canned JSON per URL. Unknown URLs fail like an unreachable host.
#[derive(Default)]
pub struct MockPriceFeed {
    responses: HashMap<String, serde_json::Value>,
}

impl MockPriceFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, url: &str, body: serde_json::Value) -> Self {
        self.responses.insert(url.to_owned(), body);
        self
    }
}

#[async_trait]
impl PriceFeed for MockPriceFeed {
    async fn fetch_json(&self, url: &str) -> Result<serde_json::Value, RpcError> {
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| RpcError::InvalidResponse(format!("connection refused: {url}")))
    }
}
