//! End-to-end tests against an in-process mock chain node.
//!
//! The mock node speaks the same JSON-RPC surface as a real endpoint:
//! `system_chain`, `chain_getBlockHash`, and `contracts_call` with a
//! dry-run execution result.

use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use contract_gateway::{create_router, AppState, CallBudget, Config, Error, Gateway};
use gateway_types::AccountId;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower::ServiceExt;

const CALLER: &str = "5FByQK5rfjhwNziJWj8dkdPwMZd4Y6AMfB4R5mf1PApPGbZp";
const CONTRACT: &str = "5HPxrgxXKty68BJNT3RGikEEQNrTmKngTXJLYqGQ62FVcGF6";
const EMPTY_ACCOUNT: &str = "5FWWf41gG6isBuqVmCaut8ZTMB5fRa2CJ5YV1uXhv7Tfuevm";
const GENESIS: &str = "0x05d5279c52c484cc80396535a316add7d47b1c5b9e0398dd1f584149341460c5";

fn metadata() -> Value {
    json!({
        "contract": { "name": "LiquidZeroDogToken" },
        "spec": {
            "messages": [
                { "label": "totalSupply", "selector": "0x162df8c2", "args": [] },
                { "label": "balanceOf", "selector": "0x6568382f",
                  "args": [{ "label": "owner" }] },
                { "label": "transfer", "selector": "0xdb20f9f5", "mutates": true,
                  "args": [{ "label": "to" }, { "label": "value" }] },
                { "label": "whoami", "selector": "0x9bae9d5e", "args": [] }
            ]
        }
    })
}

fn budget() -> CallBudget {
    CallBudget::new(5_000_000_000_000u64, 1_000_000u64)
}

fn exec_result(success: bool, output: Value, error: Option<&str>) -> Value {
    let mut result = json!({
        "success": success,
        "output": output,
        "gasConsumed": { "refTime": "1234567890", "proofSize": "4321" },
        "storageDeposit": "0",
    });
    if let Some(detail) = error {
        result["error"] = json!(detail);
    }
    result
}

async fn mock_node(Json(request): Json<Value>) -> Json<Value> {
    let id = request["id"].clone();
    let result = match request["method"].as_str() {
        Some("system_chain") => Some(json!("Aleph Zero Testnet")),
        Some("chain_getBlockHash") => Some(json!(GENESIS)),
        Some("contracts_call") => {
            let call = &request["params"][0];
            let origin = call["origin"].as_str().unwrap_or_default().to_string();
            Some(match call["message"]["label"].as_str() {
                Some("totalSupply") => exec_result(true, json!(1_000_000), None),
                Some("balanceOf") => {
                    let owner = call["message"]["args"][0].as_str().unwrap_or_default();
                    let balance = if owner == CALLER { 250 } else { 0 };
                    exec_result(true, json!(balance), None)
                }
                Some("transfer") => {
                    if origin == EMPTY_ACCOUNT {
                        exec_result(false, Value::Null, Some("InsufficientBalance"))
                    } else {
                        exec_result(true, Value::Null, None)
                    }
                }
                Some("whoami") => exec_result(true, json!({ "caller": origin }), None),
                other => {
                    let detail = format!("unknown message {other:?}");
                    exec_result(false, Value::Null, Some(detail.as_str()))
                }
            })
        }
        _ => None,
    };
    match result {
        Some(result) => Json(json!({ "jsonrpc": "2.0", "id": id, "result": result })),
        None => Json(json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": { "code": -32601, "message": "Method not found" }
        })),
    }
}

async fn spawn_mock_node() -> Result<SocketAddr> {
    let app = Router::new().route("/", post(mock_node));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    Ok(addr)
}

async fn connect(addr: SocketAddr) -> Result<Gateway> {
    Ok(Gateway::connect(&format!("http://{addr}/"), Duration::from_secs(5)).await?)
}

#[tokio::test]
async fn readiness_probe_reports_chain_info() -> Result<()> {
    let addr = spawn_mock_node().await?;
    let gateway = connect(addr).await?;
    assert_eq!(gateway.chain_info().chain, "Aleph Zero Testnet");
    assert_eq!(gateway.chain_info().genesis_hash, GENESIS);
    Ok(())
}

#[tokio::test]
async fn unreachable_endpoint_is_a_connection_error() {
    // Port 1 is never listening.
    let err = Gateway::connect("http://127.0.0.1:1/", Duration::from_secs(5))
        .await
        .err()
        .unwrap();
    assert!(matches!(err, Error::Connection(_)));
}

#[tokio::test]
async fn total_supply_round_trip() -> Result<()> {
    let addr = spawn_mock_node().await?;
    let gateway = connect(addr).await?;
    let contract = gateway.resolve_contract(&metadata(), CONTRACT)?;
    let caller: AccountId = CALLER.parse()?;

    let outcome = gateway
        .call(&contract, "totalSupply", &caller, &[], &budget())
        .await?;
    assert!(outcome.succeeded());
    assert_eq!(outcome.value(), Some(&json!(1_000_000)));
    assert_eq!(
        outcome.resource_used().compute_consumed,
        "1234567890".parse()?
    );
    Ok(())
}

#[tokio::test]
async fn balance_of_empty_account_is_zero() -> Result<()> {
    let addr = spawn_mock_node().await?;
    let gateway = connect(addr).await?;
    let contract = gateway.resolve_contract(&metadata(), CONTRACT)?;
    let caller: AccountId = CALLER.parse()?;

    let outcome = gateway
        .call(
            &contract,
            "balanceOf",
            &caller,
            &[json!(EMPTY_ACCOUNT)],
            &budget(),
        )
        .await?;
    assert!(outcome.succeeded());
    assert_eq!(outcome.value(), Some(&json!(0)));
    Ok(())
}

#[tokio::test]
async fn rejected_transfer_comes_back_in_band() -> Result<()> {
    let addr = spawn_mock_node().await?;
    let gateway = connect(addr).await?;
    let contract = gateway.resolve_contract(&metadata(), CONTRACT)?;
    let sender: AccountId = EMPTY_ACCOUNT.parse()?;

    let outcome = gateway
        .call(
            &contract,
            "transfer",
            &sender,
            &[json!(CALLER), json!(7)],
            &budget(),
        )
        .await?;
    assert!(!outcome.succeeded());
    assert_eq!(outcome.error_detail(), Some("InsufficientBalance"));
    Ok(())
}

#[tokio::test]
async fn concurrent_queries_do_not_cross_talk() -> Result<()> {
    let addr = spawn_mock_node().await?;
    let gateway = Arc::new(connect(addr).await?);
    let contract = gateway.resolve_contract(&metadata(), CONTRACT)?;

    let mut handles = Vec::new();
    for suffix in ["A", "B", "C", "D", "E", "F", "G", "H"] {
        let gateway = Arc::clone(&gateway);
        let contract = contract.clone();
        let caller: AccountId =
            format!("{}{}", &CALLER[..CALLER.len() - 1], suffix).parse()?;
        handles.push(tokio::spawn(async move {
            let outcome = gateway
                .call(&contract, "whoami", &caller, &[], &budget())
                .await
                .unwrap();
            (caller, outcome)
        }));
    }

    for handle in handles {
        let (caller, outcome) = handle.await?;
        assert!(outcome.succeeded());
        assert_eq!(outcome.value(), Some(&json!({ "caller": caller.as_str() })));
    }
    Ok(())
}

// --- REST boundary ---

async fn app(addr: SocketAddr) -> Result<Router> {
    let config = Config {
        endpoint_url: format!("http://{addr}/"),
        contract_address: CONTRACT.into(),
        ..Config::default()
    };
    let gateway = connect(addr).await?;
    let contract = gateway.resolve_contract(&metadata(), CONTRACT)?;
    let state = Arc::new(AppState {
        config,
        gateway,
        contract,
        budget: budget(),
        start_time: Instant::now(),
        request_count: AtomicU64::new(0),
    });
    Ok(create_router(state))
}

fn post_json(uri: &str, body: &Value) -> Result<Request<Body>> {
    Ok(Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body)?))?)
}

async fn body_json(response: axum::response::Response) -> Result<Value> {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[tokio::test]
async fn health_reports_chain_and_contract() -> Result<()> {
    let addr = spawn_mock_node().await?;
    let app = app(addr).await?;

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    assert_eq!(body["status"], json!("ok"));
    assert_eq!(body["chain"], json!("Aleph Zero Testnet"));
    assert_eq!(body["contract_address"], json!(CONTRACT));
    Ok(())
}

#[tokio::test]
async fn transfer_endpoint_returns_result_on_success() -> Result<()> {
    let addr = spawn_mock_node().await?;
    let app = app(addr).await?;

    let request = post_json(
        "/transfer",
        &json!({ "sender": CALLER, "receiver": EMPTY_ACCOUNT, "amount": 7 }),
    )?;
    let response = app.oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    assert_eq!(body["result"]["succeeded"], json!(true));
    assert!(body.get("error").is_none());
    Ok(())
}

#[tokio::test]
async fn transfer_endpoint_returns_500_on_rejection() -> Result<()> {
    let addr = spawn_mock_node().await?;
    let app = app(addr).await?;

    let request = post_json(
        "/transfer",
        &json!({ "sender": EMPTY_ACCOUNT, "receiver": CALLER, "amount": 7 }),
    )?;
    let response = app.oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await?;
    assert_eq!(body["error"], json!("InsufficientBalance"));
    Ok(())
}

#[tokio::test]
async fn transfer_endpoint_returns_500_on_malformed_sender() -> Result<()> {
    let addr = spawn_mock_node().await?;
    let app = app(addr).await?;

    let request = post_json(
        "/transfer",
        &json!({ "sender": "not-an-address", "receiver": CALLER, "amount": 7 }),
    )?;
    let response = app.oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await?;
    assert!(body["error"].as_str().unwrap().contains("malformed address"));
    Ok(())
}

#[tokio::test]
async fn query_endpoint_rejects_unknown_method() -> Result<()> {
    let addr = spawn_mock_node().await?;
    let app = app(addr).await?;

    let request = post_json("/query", &json!({ "method": "burnAll", "caller": CALLER }))?;
    let response = app.oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await?;
    assert_eq!(body["success"], json!(false));
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("unknown contract method"));
    Ok(())
}

#[tokio::test]
async fn query_endpoint_runs_a_read_only_call() -> Result<()> {
    let addr = spawn_mock_node().await?;
    let app = app(addr).await?;

    let request = post_json(
        "/query",
        &json!({ "method": "balanceOf", "caller": CALLER, "args": [CALLER] }),
    )?;
    let response = app.oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    assert_eq!(body["succeeded"], json!(true));
    assert_eq!(body["value"], json!(250));
    Ok(())
}
