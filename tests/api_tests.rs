//! HTTP API tests
//!
//! Drives the full router in-process with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use tower::ServiceExt;

use wallet_server::auth::{CredentialStore, TokenService, User};
use wallet_server::catalog::ItemCatalog;
use wallet_server::ledger::Ledger;
use wallet_server::routes;
use wallet_server::state::AppState;
use wallet_server::wallet::WalletService;

const TEST_SECRET: &str = "api-test-secret";

fn test_app() -> Router {
    let wallet_service = WalletService::new(
        CredentialStore::new(4),
        TokenService::new(TEST_SECRET, Duration::minutes(30)),
        Ledger::new(),
        ItemCatalog::seeded(),
        dec!(100.00),
    );
    routes::app(AppState::new(Arc::new(wallet_service)))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn json_request(method: Method, uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

fn login_request(username: &str, password: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/auth/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!("username={}&password={}", username, password)))
        .unwrap()
}

async fn register_and_login(app: &Router, username: &str, password: &str) -> String {
    let (status, _) = send(
        app,
        json_request(
            Method::POST,
            "/auth/register",
            json!({"username": username, "password": password}),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(app, login_request(username, password)).await;
    assert_eq!(status, StatusCode::OK);
    body["access_token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health() {
    let app = test_app();
    let (status, body) = send(&app, get("/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_register_response_has_username_only() {
    let app = test_app();
    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/auth/register",
            json!({"username": "alice", "password": "pw123456"}),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"username": "alice"}));
}

#[tokio::test]
async fn test_register_validation_and_duplicates() {
    let app = test_app();

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/auth/register",
            json!({"username": "alice", "password": "short"}),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    register_and_login(&app, "alice", "pw123456").await;

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/auth/register",
            json!({"username": "alice", "password": "another-password"}),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn test_login_token_type_and_failures() {
    let app = test_app();
    register_and_login(&app, "alice", "pw123456").await;

    let (status, body) = send(&app, login_request("alice", "pw123456")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "bearer");

    let (wrong_pw_status, wrong_pw) = send(&app, login_request("alice", "nope")).await;
    let (unknown_status, unknown) = send(&app, login_request("nobody", "pw123456")).await;
    assert_eq!(wrong_pw_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_pw, unknown);
}

#[tokio::test]
async fn test_wallet_flow_over_http() {
    let app = test_app();
    let token = register_and_login(&app, "alice", "pw123456").await;

    let (status, body) = send(&app, get("/wallet/balance", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"user_id": 1, "username": "alice", "balance": 100.0}));

    let (status, body) = send(
        &app,
        json_request(Method::POST, "/items/buy/1", Value::Null, Some(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["balance"], 50.0);

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/wallet/spend",
            json!({"amount": 20.50, "description": "taxi"}),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["balance"], 29.5);

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/wallet/spend",
            json!({"amount": 1000.00, "description": "too much"}),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INSUFFICIENT_FUNDS");

    let (_, body) = send(&app, get("/wallet/balance", Some(&token))).await;
    assert_eq!(body["balance"], 29.5);
}

#[tokio::test]
async fn test_spend_defaults_description_and_rejects_bad_amounts() {
    let app = test_app();
    let token = register_and_login(&app, "alice", "pw123456").await;

    let (status, _) = send(
        &app,
        json_request(Method::POST, "/wallet/spend", json!({"amount": 5}), Some(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, transactions) = send(&app, get("/transactions", None)).await;
    assert_eq!(transactions[1]["description"], "General Spend");
    assert_eq!(transactions[1]["type"], "SPEND");
    assert_eq!(transactions[1]["amount"], -5.0);

    let (status, body) = send(
        &app,
        json_request(Method::POST, "/wallet/spend", json!({"amount": -3}), Some(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = test_app();

    let (status, body) = send(&app, get("/wallet/balance", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "MISSING_TOKEN");

    let (status, body) = send(&app, get("/wallet/balance", Some("not.a.token"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");

    let response = app
        .clone()
        .oneshot(json_request(Method::POST, "/items/buy/1", Value::Null, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");
}

#[tokio::test]
async fn test_expired_token_has_its_own_message() {
    let app = test_app();
    register_and_login(&app, "alice", "pw123456").await;

    let alice = User {
        id: 1,
        username: "alice".to_string(),
        password_hash: String::new(),
    };
    let stale = TokenService::new(TEST_SECRET, Duration::minutes(30))
        .issue_at(&alice, Utc::now() - Duration::hours(2))
        .unwrap();

    let response = app
        .clone()
        .oneshot(get("/wallet/balance", Some(&stale)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");

    let (_, body) = send(&app, get("/wallet/balance", Some(&stale))).await;
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    assert_eq!(body["error"]["message"], "Unauthorized: Token has expired");

    let (_, forged) = send(&app, get("/wallet/balance", Some("not.a.token"))).await;
    assert_eq!(
        forged["error"]["message"],
        "Unauthorized: Could not validate credentials"
    );
}

#[tokio::test]
async fn test_unparseable_requests_get_json_errors() {
    let app = test_app();
    let token = register_and_login(&app, "alice", "pw123456").await;

    let broken_json = Request::builder()
        .method(Method::POST)
        .uri("/wallet/spend")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from("{\"amount\": "))
        .unwrap();
    let (status, body) = send(&app, broken_json).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/auth/register",
            json!({"username": "bob"}),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    let missing_password = Request::builder()
        .method(Method::POST)
        .uri("/auth/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("username=alice"))
        .unwrap();
    let (status, body) = send(&app, missing_password).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    let (status, body) = send(
        &app,
        json_request(Method::POST, "/items/buy/not-a-number", Value::Null, Some(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    // Nothing above touched the ledger
    let (_, transactions) = send(&app, get("/transactions", None)).await;
    assert_eq!(transactions.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_buy_unknown_item() {
    let app = test_app();
    let token = register_and_login(&app, "alice", "pw123456").await;

    let (status, body) = send(
        &app,
        json_request(Method::POST, "/items/buy/999", Value::Null, Some(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_items_and_debug_listings() {
    let app = test_app();
    register_and_login(&app, "alice", "pw123456").await;
    register_and_login(&app, "bob", "pw654321").await;

    let (status, items) = send(&app, get("/items/list", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(items.as_array().unwrap().len(), 5);
    assert_eq!(items[1], json!({"id": 2, "name": "Coffee Mug", "price": 25.5}));

    let (status, users) = send(&app, get("/users", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        users,
        json!([{"id": 1, "username": "alice"}, {"id": 2, "username": "bob"}])
    );

    let (status, transactions) = send(&app, get("/transactions", None)).await;
    assert_eq!(status, StatusCode::OK);
    let transactions = transactions.as_array().unwrap();
    assert_eq!(transactions.len(), 2);
    assert_eq!(transactions[0]["type"], "REGISTER");
    assert_eq!(transactions[0]["amount"], 100.0);
    assert!(transactions[0]["timestamp"].is_string());
}
