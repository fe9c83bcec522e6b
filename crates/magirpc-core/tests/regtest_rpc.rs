use std::env;
use std::sync::{Arc, Once};

use magirpc_core::price::{HttpPriceFeed, PriceSources};
use magirpc_core::resolver::is_address;
use magirpc_core::rpc::{HttpRpcClient, NodeRpc};
use magirpc_core::{CoreError, TransferRequest, WalletService};

static TRACING_INIT: Once = Once::new();

fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("magirpc_core=debug")),
            )
            .with_target(true)
            .try_init();
    });
}

fn connect() -> Arc<HttpRpcClient> {
    let rpc_url = env::var("MAGIRPC_TEST_RPC_URL").expect("MAGIRPC_TEST_RPC_URL must be set");
    let rpc_user = env::var("MAGIRPC_TEST_RPC_USER").expect("MAGIRPC_TEST_RPC_USER must be set");
    let rpc_pass = env::var("MAGIRPC_TEST_RPC_PASS").expect("MAGIRPC_TEST_RPC_PASS must be set");
    Arc::new(
        HttpRpcClient::new(&rpc_url, Some(&rpc_user), Some(&rpc_pass), None, None)
            .expect("rpc client must construct"),
    )
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires a local Magi daemon in regtest/testnet mode"]
async fn live_node_wallet_round_trip() {
    init_tracing();

    let rpc = connect();
    let feed = Arc::new(HttpPriceFeed::new().expect("price feed must construct"));
    let service = WalletService::new(rpc.clone(), feed, PriceSources::default());

    let connections = rpc
        .get_connection_count()
        .await
        .expect("getconnectioncount must succeed");
    eprintln!("[itest] node reports {connections} connections");

    let wallet = service
        .create_wallet(None)
        .await
        .expect("wallet creation must succeed");
    assert!(is_address(&wallet.address), "node must mint canonical addresses");
    eprintln!("[itest] created wallet {} -> {}", wallet.label, wallet.address);

    assert!(service
        .wallet_exists(&wallet.address)
        .await
        .expect("wallet listing must succeed"));
    assert_eq!(
        service
            .get_account_name(&wallet.address)
            .await
            .expect("address must resolve"),
        wallet.label
    );
    assert_eq!(
        service
            .get_account_address(&wallet.label)
            .await
            .expect("label must resolve"),
        wallet.address
    );

    let duplicate = service.create_wallet(Some(&wallet.label)).await;
    assert!(matches!(duplicate, Err(CoreError::Conflict(_))));

    let balance = service
        .get_balance(Some(&wallet.label))
        .await
        .expect("balance must succeed");
    assert_eq!(balance, 0.0, "a fresh wallet holds nothing");

    let too_small = TransferRequest::new(wallet.label.clone(), wallet.address.clone(), 0.001);
    assert!(matches!(
        service.send(&too_small).await,
        Err(CoreError::Validation(_))
    ));
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires a local Magi daemon and outbound network access"]
async fn live_node_statistics() {
    init_tracing();

    let rpc = connect();
    let feed = Arc::new(HttpPriceFeed::new().expect("price feed must construct"));
    let service = WalletService::new(rpc, feed, PriceSources::default());

    let snapshot = service
        .get_statistics()
        .await
        .expect("statistics must aggregate");
    eprintln!(
        "[itest] blocks={} connections={} hours_to_stake={:?} max_price={}",
        snapshot.blocks,
        snapshot.connections,
        snapshot.hours_to_stake,
        snapshot.price.max()
    );
    assert!(snapshot.blocks > 0);
}
