use axum::Json;
use serde::Serialize;

use magirpc_core::accounts::DEFAULT_TRANSACTION_LIMIT;

use super::error::AppError;

// ==============================================================================
// Hard Ceilings for Transaction Listings
// ==============================================================================

pub(crate) const HARD_MAX_TRANSACTIONS: usize = 1000;

#[derive(Serialize)]
pub(super) struct LimitsResponse {
    default_transactions: usize,
    hard_max_transactions: usize,
}

pub(super) async fn get_limits() -> Json<LimitsResponse> {
    Json(LimitsResponse {
        default_transactions: DEFAULT_TRANSACTION_LIMIT,
        hard_max_transactions: HARD_MAX_TRANSACTIONS,
    })
}

pub(super) fn transaction_limit(requested: Option<usize>) -> Result<usize, AppError> {
    match requested {
        None => Ok(DEFAULT_TRANSACTION_LIMIT),
        Some(0) => Err(AppError::BadRequest("limit must be at least 1".to_string())),
        Some(n) if n > HARD_MAX_TRANSACTIONS => Err(AppError::BadRequest(format!(
            "limit must be at most {HARD_MAX_TRANSACTIONS}"
        ))),
        Some(n) => Ok(n),
    }
}
