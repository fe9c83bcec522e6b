use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

use magirpc_core::{PriceBook, StatisticsSnapshot};

use super::auth::check_auth;
use super::error::AppError;
use super::SharedState;

pub(super) async fn get_price(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<Json<PriceBook>, AppError> {
    check_auth(&state.api_token, &headers)?;
    Ok(Json(state.service.get_price().await?))
}

pub(super) async fn get_statistics(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<Json<StatisticsSnapshot>, AppError> {
    check_auth(&state.api_token, &headers)?;
    Ok(Json(state.service.get_statistics().await?))
}
