mod cli;
mod server;

use std::sync::Arc;

use clap::Parser;
use eyre::{eyre, WrapErr};

use magirpc_core::price::HttpPriceFeed;
use magirpc_core::rpc::{HttpRpcClient, NodeRpc};
use magirpc_core::WalletService;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .init();

    let api_token = match &args.api_token {
        Some(token) if !token.is_empty() => token.clone(),
        _ => generate_api_token(),
    };

    let price_sources = args.price_sources().context("parse price source options")?;

    // Connect to the node RPC and verify the connection succeeds before
    // starting the server.
    let rpc: Arc<dyn NodeRpc> = Arc::new(
        HttpRpcClient::new(
            &args.rpc_url,
            args.rpc_user.as_deref(),
            args.rpc_pass.as_deref(),
            args.rpc_cookie_file.as_deref(),
            args.rpc_requests_per_second,
        )
        .context("configure node RPC client")?,
    );

    let connections = rpc.get_connection_count().await.map_err(|err| {
        let message = format_rpc_connect_error(&args.rpc_url, &err.to_string());
        eyre!(message).wrap_err("while attempting to connect to the node RPC")
    })?;
    tracing::info!(connections, "connected to node");
    if connections == 0 {
        tracing::warn!("node has no peers; statistics and transfers may be stale");
    }

    for market in &price_sources.markets {
        tracing::info!(market = %market.name, url = %market.url, ticker = %market.ticker, "price market");
    }

    let price_feed = Arc::new(HttpPriceFeed::new().context("configure price client")?);
    let service = WalletService::new(rpc, price_feed, price_sources);

    let state = server::AppState {
        service: Arc::new(service),
        api_token: api_token.clone(),
    };

    let bind_addr = format!("{}:{}", args.bind, args.port);
    let origin = format!("http://{}:{}", args.bind, args.port);
    let router = server::build_router(state, &origin)?;

    if args.bind == "0.0.0.0" {
        tracing::warn!("server is bound to 0.0.0.0; it is accessible from the network");
    }

    println!();
    println!("  magirpc is running:");
    println!("    URL:       http://{bind_addr}/api/v1");
    println!("    Token:     {api_token}");
    println!();

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .context("bind TCP listener")?;

    tracing::info!("listening on {bind_addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("run HTTP server")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("shutting down");
}

fn generate_api_token() -> String {
    use rand::Rng;
    let bytes: [u8; 16] = rand::thread_rng().r#gen();
    hex::encode(bytes)
}

fn format_rpc_connect_error(rpc_url: &str, source_error: &str) -> String {
    let mut lines = vec![
        format!("could not connect to RPC endpoint `{rpc_url}`"),
        format!("RPC error: {source_error}"),
    ];

    if source_error.contains("dns error") {
        lines.push("hint: hostname resolution failed; verify the RPC host".into());
    } else if source_error.contains("Connection refused") || source_error.contains("connect") {
        lines.push(
            "hint: is the daemon running with -server=1 and rpcport matching the URL?".into(),
        );
    } else if source_error.contains("401") || source_error.contains("403") {
        lines.push(
            "hint: authentication failed; verify --rpc-user/--rpc-pass or --rpc-cookie-file"
                .into(),
        );
    } else if source_error.contains("decode JSON-RPC response") {
        lines.push("hint: the endpoint answered but not with JSON-RPC; check the URL path".into());
    }

    lines.join("\n")
}
