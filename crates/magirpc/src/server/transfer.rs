use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Serialize;

use magirpc_core::TransferRequest;

use super::auth::check_auth;
use super::error::AppError;
use super::SharedState;

#[derive(Serialize)]
pub(super) struct SendResponse {
    txid: String,
}

pub(super) async fn send(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(request): Json<TransferRequest>,
) -> Result<Json<SendResponse>, AppError> {
    check_auth(&state.api_token, &headers)?;
    let txid = state.service.send(&request).await?;
    Ok(Json(SendResponse { txid }))
}
