//! End-to-end tests against a stub backend served by axum.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use haggle_core::{HaggleError, NegotiationStrength};
use haggle_present::present;
use haggle_sdk::{ClientConfig, HttpTransport, RequestController, RequestState};
use serde_json::{json, Value};
use tokio::net::TcpListener;

type Received = Arc<Mutex<Vec<Value>>>;

fn iphone_payload() -> Value {
    json!({
        "ranked_offers": [
            {"agent": "BestBuyChicago", "price": 899, "details": "$899 pickup - best price!\nOffer valid today only"},
            {"agent": "TargetLA", "price": 930.0, "details": "$930 with RedCard"},
            {"agent": "WalmartNYC", "price": 965.5, "details": "$969 with pickup or $965 Walmart+"}
        ],
        "negotiation_log": [
            {"round": 1, "customer": "USCustomerAgent", "seller": "WalmartNYC", "summary": "$969 with pickup\nor $965 Walmart+"},
            {"round": 2, "customer": "USCustomerAgent", "seller": "TargetLA", "summary": "$930 with RedCard"},
            {"round": 3, "customer": "USCustomerAgent", "seller": "BestBuyChicago", "summary": "$899 pickup"}
        ],
        "ai_used": "Groq Llama 3.1 70B (1v1 sequential)",
        "best_deal": {"agent": "BestBuyChicago", "price": 899, "details": "$899 pickup - best price!\nOffer valid today only"}
    })
}

fn no_agents_payload() -> Value {
    json!({
        "ranked_offers": [],
        "negotiation_log": [{"error": "No matching agents"}],
        "ai_used": "Groq Llama 3.1 70B",
        "best_deal": {}
    })
}

async fn negotiate(State(received): State<Received>, Json(body): Json<Value>) -> Json<Value> {
    received.lock().unwrap().push(body.clone());

    let query = body["query"].as_str().unwrap_or_default().to_lowercase();
    if query.contains("iphone") {
        Json(iphone_payload())
    } else {
        Json(no_agents_payload())
    }
}

async fn spawn_backend() -> (SocketAddr, Received) {
    let received: Received = Arc::new(Mutex::new(Vec::new()));

    let app = Router::new()
        .route("/ai_negotiate", post(negotiate))
        .route(
            "/broken",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "Negotiation error: boom") }),
        )
        .route("/garbage", post(|| async { "definitely not json" }))
        .route(
            "/agents",
            get(|| async {
                Json(json!({
                    "ai_agents": {"WalmartNYC": "Walmart NYC (AI)", "TargetLA": "Target LA (AI)"},
                    "legacy_agents": {"store_1": "Walmart (rule-based)"}
                }))
            }),
        )
        .route(
            "/stores",
            get(|| async {
                Json(json!({"stores": [{"id": "walmart", "name": "WalmartNYC", "location": "New York"}]}))
            }),
        )
        .route(
            "/services",
            get(|| async { Json(json!({"services": [{"id": "ulta", "name": "UltaBeautyNYC"}]})) }),
        )
        .with_state(received.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, received)
}

fn controller_for(addr: SocketAddr, path: &str) -> RequestController<HttpTransport> {
    let config = ClientConfig::new(&format!("http://{}/{}", addr, path)).unwrap();
    RequestController::new(HttpTransport::new(config).unwrap())
}

#[tokio::test]
async fn test_successful_negotiation() {
    let (addr, received) = spawn_backend().await;
    let controller = controller_for(addr, "ai_negotiate");

    let state = controller
        .submit("  iPhone under $900 NYC pickup ", NegotiationStrength::MaxSavings)
        .await
        .unwrap();

    assert_eq!(
        received.lock().unwrap().clone(),
        vec![json!({"query": "iPhone under $900 NYC pickup", "max_rounds": 5})]
    );

    let result = state.result().expect("success state");
    let model = present(result);

    let best = model.best_deal.as_ref().unwrap();
    assert_eq!(best.agent, "BestBuyChicago");
    assert_eq!(best.price, "899.00");
    assert_eq!(best.snippet, "$899 pickup - best price!");

    assert_eq!(
        model.offers.iter().map(|o| o.agent.as_str()).collect::<Vec<_>>(),
        vec!["BestBuyChicago", "TargetLA", "WalmartNYC"]
    );
    assert_eq!(model.offers[2].price, "965.50");
    assert_eq!(model.transcript[0].label, "Round 1 — Talked to WalmartNYC");
    assert_eq!(model.transcript[0].summary, "$969 with pickup\nor $965 Walmart+");
    assert_eq!(model.ai_used, "Groq Llama 3.1 70B (1v1 sequential)");
}

#[tokio::test]
async fn test_no_matching_agents() {
    let (addr, _) = spawn_backend().await;
    let controller = controller_for(addr, "ai_negotiate");

    let state = controller
        .submit("a pony", NegotiationStrength::Quick)
        .await
        .unwrap();
    let model = present(state.result().unwrap());

    assert!(!model.has_best_deal());
    assert!(!model.logs_present());
    assert!(model.offers_empty());
    assert_eq!(
        model.empty_state.unwrap().notices,
        vec!["No matching agents".to_string()]
    );
}

#[tokio::test]
async fn test_server_error_becomes_error_state() {
    let (addr, _) = spawn_backend().await;
    let controller = controller_for(addr, "broken");

    let state = controller
        .submit("iphone", NegotiationStrength::Standard)
        .await
        .unwrap();

    assert_eq!(state, RequestState::Error("API error: 500".to_string()));
}

#[tokio::test]
async fn test_unparseable_body_becomes_error_state() {
    let (addr, _) = spawn_backend().await;
    let controller = controller_for(addr, "garbage");

    let state = controller
        .submit("iphone", NegotiationStrength::Standard)
        .await
        .unwrap();

    assert!(state.error_message().unwrap().starts_with("Serialization error"));
}

#[tokio::test]
async fn test_unreachable_backend_becomes_error_state() {
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let controller = controller_for(addr, "ai_negotiate");

    let state = controller
        .submit("iphone", NegotiationStrength::Standard)
        .await
        .unwrap();

    assert!(state.error_message().unwrap().starts_with("Connection error"));
}

#[tokio::test]
async fn test_blank_query_never_reaches_backend() {
    let (addr, received) = spawn_backend().await;
    let controller = controller_for(addr, "ai_negotiate");

    let outcome = controller.submit("   ", NegotiationStrength::Standard).await;

    assert_eq!(outcome, Err(HaggleError::EmptyQuery));
    assert!(received.lock().unwrap().is_empty());
    assert_eq!(controller.state().await, RequestState::Idle);
}

#[tokio::test]
async fn test_catalog_listings() {
    let (addr, _) = spawn_backend().await;
    let config = ClientConfig::new(&format!("http://{}/ai_negotiate", addr)).unwrap();
    let transport = HttpTransport::new(config).unwrap();

    let agents = transport.list_agents().await.unwrap();
    assert_eq!(agents.ai_agents.len(), 2);
    assert_eq!(agents.legacy_agents["store_1"], "Walmart (rule-based)");

    let stores = transport.list_stores().await.unwrap();
    assert_eq!(stores[0].name, "WalmartNYC");

    let services = transport.list_services().await.unwrap();
    assert_eq!(services[0].id, "ulta");
}
