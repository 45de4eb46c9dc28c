use std::env;
use std::sync::Once;

use minter_api::MinterClient;

static TRACING_INIT: Once = Once::new();

fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("minter_api=debug")),
            )
            .with_target(true)
            .try_init();
    });
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires a reachable Minter node; set MINTER_TEST_NODE_URL and MINTER_TEST_ADDRESS"]
async fn live_node_answers_read_endpoints() {
    init_tracing();

    let node_url = env::var("MINTER_TEST_NODE_URL").expect("MINTER_TEST_NODE_URL must be set");
    let address = env::var("MINTER_TEST_ADDRESS").expect("MINTER_TEST_ADDRESS must be set");
    let client = MinterClient::new(&node_url).expect("client must build");

    eprintln!("[itest] checking get_status against {node_url}");
    let status = client.get_status().await.expect("status must succeed");
    let height = status
        .field("latest_block_height")
        .and_then(|h| h.as_str())
        .and_then(|h| h.parse::<u64>().ok())
        .expect("status must report latest_block_height");
    assert!(height > 0, "node must have produced blocks");

    let block = client.get_block(height).await.expect("latest block must load");
    assert!(block.field("hash").is_some(), "block must carry a hash");

    let balance = client
        .get_balance(&address, None)
        .await
        .expect("balance must succeed")
        .into_result();
    let nonce = client.get_nonce(&address).await.expect("nonce must succeed");
    assert!(
        nonce >= balance.transaction_count + 1,
        "nonce must not go backwards between calls"
    );

    client
        .get_validators(Some(height))
        .await
        .expect("validators at latest height must succeed");
    client
        .get_min_gas_price()
        .await
        .expect("min gas price must succeed");
}
