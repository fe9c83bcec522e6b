use std::num::NonZeroU32;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::header;
use serde_json::json;
use tracing::{debug, trace};

use crate::error::{CoreError, RpcError};

use super::super::types::{MiningInfo, ReceivedByAddress, WalletTransaction};
use super::super::NodeRpc;
use super::connection::{parse_connection, resolve_auth};
use super::parsing::{
    decode_result, parse_amount_result, parse_bool_result, parse_count_result,
    parse_string_result,
};
use super::protocol::{parse_jsonrpc_error, positional, JsonRpcRequest, JsonRpcResponse};

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Magi wallet JSON-RPC client over HTTP(S).
///
/// One client is one node connection. Node-wide settings changed through it
/// (`settxfee`) are visible to every caller sharing the node.
pub struct HttpRpcClient {
    client: reqwest::Client,
    url: String,
    auth: Option<(String, String)>,
    limiter: Option<DirectRateLimiter>,
    next_id: AtomicU64,
}

impl HttpRpcClient {
    /// Create a new client for an HTTP URL.
    ///
    /// Authentication precedence:
    /// 1. explicit `user` + `pass`
    /// 2. cookie file (`username:password`) from `cookie_file`
    /// 3. no auth
    ///
    /// If `requests_per_second` is set, outbound calls are rate-limited.
    pub fn new(
        connection: &str,
        user: Option<&str>,
        pass: Option<&str>,
        cookie_file: Option<&Path>,
        requests_per_second: Option<u32>,
    ) -> Result<Self, CoreError> {
        let auth = resolve_auth(user, pass, cookie_file)?;
        let url = parse_connection(connection)?;

        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(8)
            .tcp_nodelay(true)
            .build()
            .map_err(|e| CoreError::Config(format!("build rpc http client: {e}")))?;

        let limiter = match requests_per_second {
            None => None,
            Some(limit) => {
                let limit = NonZeroU32::new(limit).ok_or_else(|| {
                    CoreError::Config("requests_per_second must be at least 1".to_owned())
                })?;
                Some(RateLimiter::direct(Quota::per_second(limit)))
            }
        };

        Ok(Self {
            client,
            url,
            auth,
            limiter,
            next_id: AtomicU64::new(initial_request_id()),
        })
    }

    fn reserve_request_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    async fn wait_for_rate_limit(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
    }

    async fn rpc_call(
        &self,
        method: &str,
        params: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value, RpcError> {
        self.wait_for_rate_limit().await;
        let id = self.reserve_request_id();
        debug!(
            rpc.id = id,
            rpc.method = method,
            rpc.params = params.len(),
            "rpc call"
        );
        let req = JsonRpcRequest {
            jsonrpc: "1.0",
            id,
            method,
            params,
        };

        let mut builder = self
            .client
            .post(&self.url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&req);
        if let Some((ref user, ref pass)) = self.auth {
            builder = builder.basic_auth(user, Some(pass));
        }

        let response = builder.send().await?;
        let status = response.status();

        let body = response.text().await?;
        debug!(rpc.id = id, rpc.method = method, %status, body_len = body.len(), "rpc response");
        trace!(rpc.id = id, rpc.method = method, body = %body, "rpc response body");

        // Legacy daemons answer errors with HTTP 500 and a JSON-RPC body, so
        // the status alone is not enough to classify a failure.
        let decoded: JsonRpcResponse = serde_json::from_str(&body).map_err(|e| {
            RpcError::InvalidResponse(format!(
                "decode JSON-RPC response (HTTP {status}): {e}; body={body}"
            ))
        })?;

        if let Some(err) = decoded.error.filter(|e| !e.is_null()) {
            return Err(parse_jsonrpc_error(err));
        }

        Ok(decoded.result.unwrap_or(serde_json::Value::Null))
    }
}

#[async_trait]
impl NodeRpc for HttpRpcClient {
    async fn list_received_by_address(
        &self,
        min_confirmations: u32,
        include_empty: bool,
    ) -> Result<Vec<ReceivedByAddress>, RpcError> {
        let raw = self
            .rpc_call(
                "listreceivedbyaddress",
                vec![json!(min_confirmations), json!(include_empty)],
            )
            .await?;
        decode_result(raw, "listreceivedbyaddress")
    }

    async fn get_account(&self, address: &str) -> Result<String, RpcError> {
        let raw = self.rpc_call("getaccount", vec![json!(address)]).await?;
        parse_string_result(raw, "getaccount")
    }

    async fn get_addresses_by_account(&self, label: &str) -> Result<Vec<String>, RpcError> {
        let raw = self
            .rpc_call("getaddressesbyaccount", vec![json!(label)])
            .await?;
        decode_result(raw, "getaddressesbyaccount")
    }

    async fn list_transactions(
        &self,
        label: Option<&str>,
        count: Option<usize>,
    ) -> Result<Vec<WalletTransaction>, RpcError> {
        let params = positional(vec![label.map(|l| json!(l)), count.map(|c| json!(c))]);
        let raw = self.rpc_call("listtransactions", params).await?;
        decode_result(raw, "listtransactions")
    }

    async fn get_new_address(&self, label: &str) -> Result<String, RpcError> {
        let raw = self.rpc_call("getnewaddress", vec![json!(label)]).await?;
        parse_string_result(raw, "getnewaddress")
    }

    async fn set_tx_fee(&self, fee: f64) -> Result<bool, RpcError> {
        let raw = self.rpc_call("settxfee", vec![json!(fee)]).await?;
        parse_bool_result(raw, "settxfee")
    }

    async fn send_from(
        &self,
        label: &str,
        recipient: &str,
        amount: f64,
        min_confirmations: u32,
        memo: &str,
    ) -> Result<String, RpcError> {
        let raw = self
            .rpc_call(
                "sendfrom",
                vec![
                    json!(label),
                    json!(recipient),
                    json!(amount),
                    json!(min_confirmations),
                    json!(memo),
                ],
            )
            .await?;
        parse_string_result(raw, "sendfrom")
    }

    async fn get_mining_info(&self) -> Result<MiningInfo, RpcError> {
        let raw = self.rpc_call("getmininginfo", Vec::new()).await?;
        decode_result(raw, "getmininginfo")
    }

    async fn get_connection_count(&self) -> Result<u64, RpcError> {
        let raw = self.rpc_call("getconnectioncount", Vec::new()).await?;
        parse_count_result(raw, "getconnectioncount")
    }

    async fn get_balance(
        &self,
        label: Option<&str>,
        min_confirmations: Option<u32>,
    ) -> Result<f64, RpcError> {
        let params = positional(vec![
            label.map(|l| json!(l)),
            min_confirmations.map(|c| json!(c)),
        ]);
        let raw = self.rpc_call("getbalance", params).await?;
        parse_amount_result(raw, "getbalance")
    }
}

fn initial_request_id() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}
