mod accounts;
mod auth;
mod error;
mod limits;
mod network;
mod transfer;
mod wallets;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{any, get, post};
use axum::{Json, Router};
use eyre::WrapErr;
use tower_http::cors::{AllowOrigin, CorsLayer};

use magirpc_core::WalletService;

// ==============================================================================
// Application State
// ==============================================================================

pub struct AppState {
    pub service: Arc<WalletService>,
    pub api_token: String,
}

type SharedState = Arc<AppState>;

// ==============================================================================
// Router
// ==============================================================================

// Request bodies are small JSON objects; anything larger is abuse.
const BODY_LIMIT: usize = 64 * 1024;

pub fn build_router(state: AppState, origin: &str) -> eyre::Result<Router> {
    // Only reflect the allowed origin when the request's Origin header
    // actually matches. Otherwise, omit the header entirely so browsers
    // get a clean CORS rejection instead of a mismatched origin value.
    let allowed: axum::http::HeaderValue = origin
        .parse()
        .wrap_err_with(|| format!("invalid CORS origin `{origin}`"))?;
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |request_origin: &axum::http::HeaderValue, _| *request_origin == allowed,
        ))
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::HeaderName::from_static(auth::API_TOKEN_HEADER),
        ]);

    let shared = Arc::new(state);

    let public_api = Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/limits", get(limits::get_limits));

    let protected_api = Router::new()
        .route(
            "/api/v1/wallets",
            get(wallets::list_wallets).post(wallets::create_wallet),
        )
        .route(
            "/api/v1/wallets/{identifier}/exists",
            get(wallets::wallet_exists),
        )
        .route(
            "/api/v1/accounts/{identifier}/name",
            get(accounts::account_name),
        )
        .route(
            "/api/v1/accounts/{identifier}/address",
            get(accounts::account_address),
        )
        .route(
            "/api/v1/accounts/{identifier}/transactions",
            get(accounts::account_transactions),
        )
        .route(
            "/api/v1/accounts/{identifier}/balance",
            get(accounts::account_balance),
        )
        .route("/api/v1/transactions", get(accounts::all_transactions))
        .route("/api/v1/balance", get(accounts::wallet_balance))
        .route("/api/v1/send", post(transfer::send))
        .route("/api/v1/price", get(network::get_price))
        .route("/api/v1/statistics", get(network::get_statistics))
        .layer(DefaultBodyLimit::max(BODY_LIMIT));

    Ok(Router::new()
        .merge(public_api)
        .merge(protected_api)
        .route("/api", any(api_not_found))
        .route("/api/{*path}", any(api_not_found))
        .layer(cors)
        .with_state(shared))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn api_not_found() -> error::AppError {
    error::AppError::NotFound("API route not found".to_string())
}
