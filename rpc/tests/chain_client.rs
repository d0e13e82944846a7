use casperflow_nullables::NullTransport;
use casperflow_rpc::client::ABSORBED_FAILURES;
use casperflow_rpc::methods::{GET_BALANCE, GET_DEPLOY, GET_ITEM, GET_STATE_ROOT_HASH};
use casperflow_rpc::{ChainClient, RpcError, RpcResponse};
use casperflow_types::{DeployHash, DeployStatus, PublicKeyHex};
use serde_json::json;

const KEY: &str = "01a35887f3962a6a232e8e11fa7d4567b6866d68850974aad7289ef287676825f6";
const ROOT: &str = "0808080808080808080808080808080808080808080808080808080808080808";
const PURSE: &str = "uref-0b2c1e7d0d84e8e3a0e0d54e1f1e6b3c0d0e1f2a3b4c5d6e7f8091a2b3c4d5e6-007";

fn account() -> PublicKeyHex {
    PublicKeyHex::parse(KEY).unwrap()
}

fn script_root(transport: &NullTransport) {
    transport.respond(GET_STATE_ROOT_HASH, json!({ "state_root_hash": ROOT }));
}

fn script_purse(transport: &NullTransport) {
    transport.respond(GET_ITEM, json!({ "Account": { "main_purse": PURSE } }));
}

fn healthy_client(balance_value: serde_json::Value) -> ChainClient<NullTransport> {
    let transport = NullTransport::new();
    script_root(&transport);
    script_purse(&transport);
    transport.respond(GET_BALANCE, json!({ "balance_value": balance_value }));
    ChainClient::new(transport)
}

// ── State root ──────────────────────────────────────────────────────────

#[tokio::test]
async fn state_root_is_extracted() {
    let transport = NullTransport::new();
    script_root(&transport);
    let client = ChainClient::new(transport);

    let root = client.state_root_hash().await.unwrap();
    assert_eq!(root.as_str(), ROOT);

    let sent = client.transport().requests();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].jsonrpc, "2.0");
    assert_eq!(sent[0].method, GET_STATE_ROOT_HASH);
    assert_eq!(sent[0].params, json!({}));
}

#[tokio::test]
async fn state_root_failures_propagate() {
    let transport = NullTransport::new();
    transport.fail(GET_STATE_ROOT_HASH, "connection refused");
    let client = ChainClient::new(transport);
    assert!(matches!(
        client.state_root_hash().await,
        Err(RpcError::Transport(_))
    ));

    let transport = NullTransport::new();
    transport.respond(GET_STATE_ROOT_HASH, json!({ "api_version": "1.5.6" }));
    let client = ChainClient::new(transport);
    assert!(matches!(
        client.state_root_hash().await,
        Err(RpcError::MissingField("state_root_hash"))
    ));

    let transport = NullTransport::new();
    transport.respond_error(GET_STATE_ROOT_HASH, -32000, "node is syncing");
    let client = ChainClient::new(transport);
    assert!(matches!(
        client.state_root_hash().await,
        Err(RpcError::Remote { code: -32000, .. })
    ));
}

#[tokio::test]
async fn request_ids_increase() {
    let transport = NullTransport::new();
    script_root(&transport);
    let client = ChainClient::new(transport);

    client.state_root_hash().await.unwrap();
    client.state_root_hash().await.unwrap();

    let ids: Vec<u64> = client.transport().requests().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

// ── Purse ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn purse_lookup_uses_account_hash_key_and_fresh_root() {
    let transport = NullTransport::new();
    script_root(&transport);
    script_purse(&transport);
    let client = ChainClient::new(transport);

    let purse = client.main_purse(&account()).await.unwrap();
    assert_eq!(purse.as_str(), PURSE);

    let sent = client.transport().requests();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].method, GET_STATE_ROOT_HASH);
    assert_eq!(sent[1].method, GET_ITEM);
    assert_eq!(
        sent[1].params,
        json!({
            "state_root_hash": ROOT,
            "key": format!("account-hash-{}", &KEY[2..]),
            "path": []
        })
    );
}

#[tokio::test]
async fn purse_lookup_without_account_is_empty() {
    let transport = NullTransport::new();
    script_root(&transport);
    transport.respond(GET_ITEM, json!({ "stored_value": { "CLValue": {} } }));
    let client = ChainClient::new(transport);

    let purse = client.main_purse(&account()).await.unwrap();
    assert!(purse.is_empty());
    assert_eq!(purse.as_str(), "");
}

#[tokio::test]
async fn purse_lookup_remote_error_is_empty() {
    let transport = NullTransport::new();
    script_root(&transport);
    transport.respond_error(GET_ITEM, -32003, "value not found");
    let client = ChainClient::new(transport);

    assert!(client.main_purse(&account()).await.unwrap().is_empty());
}

#[tokio::test]
async fn purse_lookup_transport_failure_propagates() {
    let transport = NullTransport::new();
    script_root(&transport);
    transport.fail(GET_ITEM, "connection reset");
    let client = ChainClient::new(transport);

    assert!(client.main_purse(&account()).await.is_err());
}

// ── Balance ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn five_billion_motes_is_five_cspr() {
    let client = healthy_client(json!("5000000000"));
    assert_eq!(client.account_balance(&account()).await, "5.00");
}

#[tokio::test]
async fn balance_shares_one_state_root() {
    let client = healthy_client(json!("123456789012"));
    assert_eq!(client.account_balance(&account()).await, "123.46");

    let sent = client.transport().requests();
    let methods: Vec<&str> = sent.iter().map(|r| r.method.as_str()).collect();
    assert_eq!(methods, vec![GET_STATE_ROOT_HASH, GET_ITEM, GET_BALANCE]);
    assert_eq!(
        sent[2].params,
        json!({ "state_root_hash": ROOT, "purse_uref": PURSE })
    );
}

#[tokio::test]
async fn numeric_balance_value_is_accepted() {
    let client = healthy_client(json!(2_500_000_000u64));
    assert_eq!(client.account_balance(&account()).await, "2.50");
}

#[tokio::test]
async fn balance_failures_all_read_as_zero() {
    // Unreachable endpoint: nothing scripted at all.
    let client = ChainClient::new(NullTransport::new());
    assert_eq!(client.account_balance(&account()).await, "0");

    // State root error object.
    let transport = NullTransport::new();
    transport.respond_error(GET_STATE_ROOT_HASH, -32000, "boom");
    assert_eq!(ChainClient::new(transport).account_balance(&account()).await, "0");

    // Purse missing.
    let transport = NullTransport::new();
    script_root(&transport);
    transport.respond(GET_ITEM, json!({}));
    let client = ChainClient::new(transport);
    assert_eq!(client.account_balance(&account()).await, "0");
    assert_eq!(client.transport().calls_for(GET_BALANCE), 0);

    // Balance error object.
    let transport = NullTransport::new();
    script_root(&transport);
    script_purse(&transport);
    transport.respond_error(GET_BALANCE, -32026, "purse not found");
    assert_eq!(ChainClient::new(transport).account_balance(&account()).await, "0");

    // Balance transport failure.
    let transport = NullTransport::new();
    script_root(&transport);
    script_purse(&transport);
    transport.fail(GET_BALANCE, "timeout");
    assert_eq!(ChainClient::new(transport).account_balance(&account()).await, "0");

    // Envelope with neither result nor error.
    let transport = NullTransport::new();
    script_root(&transport);
    script_purse(&transport);
    transport.respond_raw(GET_BALANCE, RpcResponse::default());
    assert_eq!(ChainClient::new(transport).account_balance(&account()).await, "0");
}

#[tokio::test]
async fn malformed_balance_values_read_as_zero() {
    for bad in [json!(""), json!("12.5"), json!("-3"), json!(null), json!({ "v": 1 })] {
        let client = healthy_client(bad.clone());
        assert_eq!(
            client.account_balance(&account()).await,
            "0",
            "balance_value {bad} should read as 0"
        );
        assert_eq!(client.stats().get(ABSORBED_FAILURES), 1);
    }
}

// ── Deploy status ───────────────────────────────────────────────────────

#[tokio::test]
async fn demo_deploy_is_success_without_network() {
    let client = ChainClient::new(NullTransport::new());
    let hash = DeployHash::demo(1_700_000_000_000, "abc123xyz");

    assert_eq!(client.deploy_status(&hash).await, DeployStatus::Success);
    assert_eq!(client.transport().call_count(), 0);
}

#[tokio::test]
async fn execution_results_map_to_status() {
    let cases = [
        (json!({ "Success": { "cost": "100" } }), DeployStatus::Success),
        (json!({ "Failure": { "error_message": "User error: 1" } }), DeployStatus::Failed),
        (json!({}), DeployStatus::Pending),
    ];

    for (outcome, expected) in cases {
        let transport = NullTransport::new();
        transport.respond(
            GET_DEPLOY,
            json!({ "deploy": {}, "execution_results": [{ "block_hash": "ff", "result": outcome }] }),
        );
        let client = ChainClient::new(transport);
        let status = client.deploy_status(&DeployHash::new("a1b2c3")).await;
        assert_eq!(status, expected);

        let sent = client.transport().requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].params, json!({ "deploy_hash": "a1b2c3" }));
    }
}

#[tokio::test]
async fn deploy_status_failures_are_pending() {
    let client = ChainClient::new(NullTransport::new());
    assert_eq!(
        client.deploy_status(&DeployHash::new("a1b2c3")).await,
        DeployStatus::Pending
    );

    let transport = NullTransport::new();
    transport.respond_error(GET_DEPLOY, -32002, "deploy not known");
    let client = ChainClient::new(transport);
    assert_eq!(
        client.deploy_status(&DeployHash::new("a1b2c3")).await,
        DeployStatus::Pending
    );

    let transport = NullTransport::new();
    transport.respond(GET_DEPLOY, json!({ "execution_results": [] }));
    let client = ChainClient::new(transport);
    assert_eq!(
        client.deploy_status(&DeployHash::new("a1b2c3")).await,
        DeployStatus::Pending
    );
}
