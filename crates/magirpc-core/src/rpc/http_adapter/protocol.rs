use crate::error::RpcError;

#[derive(serde::Serialize)]
pub(super) struct JsonRpcRequest<'a> {
    pub(super) jsonrpc: &'static str,
    pub(super) id: u64,
    pub(super) method: &'a str,
    pub(super) params: Vec<serde_json::Value>,
}

#[derive(serde::Deserialize)]
pub(super) struct JsonRpcResponse {
    pub(super) result: Option<serde_json::Value>,
    pub(super) error: Option<serde_json::Value>,
}

/// Parse a JSON-RPC error value into a structured `RpcError`.
///
/// Legacy daemons report errors as `{"code": <int>, "message": <string>}`.
/// Anything else falls back to `InvalidResponse` with the raw JSON.
pub(super) fn parse_jsonrpc_error(err: serde_json::Value) -> RpcError {
    #[derive(serde::Deserialize)]
    struct JsonRpcError {
        code: i64,
        message: String,
    }

    if let Ok(parsed) = serde_json::from_value::<JsonRpcError>(err.clone()) {
        RpcError::ServerError {
            code: parsed.code,
            message: parsed.message,
        }
    } else {
        RpcError::InvalidResponse(format!("non-standard JSON-RPC error: {err}"))
    }
}

/// Build the positional parameter list for methods whose trailing arguments
/// are optional. Once an argument is absent, every later one is dropped too.
pub(super) fn positional(args: Vec<Option<serde_json::Value>>) -> Vec<serde_json::Value> {
    args.into_iter().map_while(|arg| arg).collect()
}
