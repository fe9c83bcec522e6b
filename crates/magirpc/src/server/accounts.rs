use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use magirpc_core::rpc::WalletTransaction;

use super::auth::check_auth;
use super::error::AppError;
use super::limits::transaction_limit;
use super::SharedState;

// ==============================================================================
// DTOs
// ==============================================================================

#[derive(Deserialize)]
pub(super) struct TransactionsQuery {
    limit: Option<usize>,
}

#[derive(Serialize)]
pub(super) struct NameResponse {
    name: String,
}

#[derive(Serialize)]
pub(super) struct AddressResponse {
    address: String,
}

#[derive(Serialize)]
pub(super) struct BalanceResponse {
    balance: f64,
}

// ==============================================================================
// Handlers
// ==============================================================================

pub(super) async fn account_name(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(identifier): Path<String>,
) -> Result<Json<NameResponse>, AppError> {
    check_auth(&state.api_token, &headers)?;
    let name = state.service.get_account_name(&identifier).await?;
    Ok(Json(NameResponse { name }))
}

pub(super) async fn account_address(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(identifier): Path<String>,
) -> Result<Json<AddressResponse>, AppError> {
    check_auth(&state.api_token, &headers)?;
    let address = state.service.get_account_address(&identifier).await?;
    Ok(Json(AddressResponse { address }))
}

pub(super) async fn account_transactions(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(identifier): Path<String>,
    Query(query): Query<TransactionsQuery>,
) -> Result<Json<Vec<WalletTransaction>>, AppError> {
    check_auth(&state.api_token, &headers)?;
    let limit = transaction_limit(query.limit)?;
    Ok(Json(
        state.service.get_transactions(&identifier, limit).await?,
    ))
}

pub(super) async fn all_transactions(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<Json<Vec<WalletTransaction>>, AppError> {
    check_auth(&state.api_token, &headers)?;
    Ok(Json(state.service.get_all_transactions().await?))
}

pub(super) async fn wallet_balance(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<Json<BalanceResponse>, AppError> {
    check_auth(&state.api_token, &headers)?;
    let balance = state.service.get_balance(None).await?;
    Ok(Json(BalanceResponse { balance }))
}

pub(super) async fn account_balance(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(identifier): Path<String>,
) -> Result<Json<BalanceResponse>, AppError> {
    check_auth(&state.api_token, &headers)?;
    let balance = state.service.get_balance(Some(&identifier)).await?;
    Ok(Json(BalanceResponse { balance }))
}
