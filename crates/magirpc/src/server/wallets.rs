use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};

use magirpc_core::rpc::ReceivedByAddress;
use magirpc_core::Wallet;

use super::auth::check_auth;
use super::error::AppError;
use super::SharedState;

// ==============================================================================
// DTOs
// ==============================================================================

#[derive(Default, Deserialize)]
pub(super) struct CreateWalletRequest {
    #[serde(default)]
    label: Option<String>,
}

#[derive(Serialize)]
pub(super) struct ExistsResponse {
    exists: bool,
}

// ==============================================================================
// Handlers
// ==============================================================================

pub(super) async fn list_wallets(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<Json<Vec<ReceivedByAddress>>, AppError> {
    check_auth(&state.api_token, &headers)?;
    Ok(Json(state.service.get_wallets().await?))
}

pub(super) async fn create_wallet(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<Wallet>), AppError> {
    check_auth(&state.api_token, &headers)?;
    // An empty body is the same as asking for a generated label.
    let request: CreateWalletRequest = if body.is_empty() {
        CreateWalletRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::BadRequest(format!("invalid wallet request: {e}")))?
    };
    let wallet = state.service.create_wallet(request.label.as_deref()).await?;
    Ok((StatusCode::CREATED, Json(wallet)))
}

pub(super) async fn wallet_exists(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(identifier): Path<String>,
) -> Result<Json<ExistsResponse>, AppError> {
    check_auth(&state.api_token, &headers)?;
    let exists = state.service.wallet_exists(&identifier).await?;
    Ok(Json(ExistsResponse { exists }))
}
