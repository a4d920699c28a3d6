//! Integration tests for the auth endpoints.
//!
//! Each test spawns its own server against an empty database, so usernames
//! never collide across tests.
//!
//! Run with: cargo test -p nexus-integration-tests

#![allow(clippy::indexing_slicing)]

use nexus_integration_tests::TestContext;
use reqwest::StatusCode;
use serde_json::{Value, json};

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
async fn test_register_returns_identity_and_token() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .post(ctx.url("/api/register"))
        .json(&json!({"username": "alice", "password": "secret", "role": "merchant"}))
        .send()
        .await
        .expect("Failed to send register request");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse body");

    assert!(body["id"].as_i64().expect("id should be a number") > 0);
    assert_eq!(body["username"], "alice");
    assert_eq!(body["role"], "merchant");

    // 32 random bytes, base64url without padding
    let token = body["token"].as_str().expect("token should be a string");
    assert_eq!(token.len(), 43);
}

#[tokio::test]
async fn test_register_duplicate_username_is_rejected() {
    let ctx = TestContext::new().await;
    ctx.register("alice", "secret", "merchant").await;

    let resp = ctx
        .client
        .post(ctx.url("/api/register"))
        .json(&json!({"username": "alice", "password": "other", "role": "customer"}))
        .send()
        .await
        .expect("Failed to send register request");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse body");
    assert_eq!(body, json!({"error": "Username already exists"}));
}

#[tokio::test]
async fn test_register_empty_username_is_rejected() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .post(ctx.url("/api/register"))
        .json(&json!({"username": "", "password": "secret", "role": "customer"}))
        .send()
        .await
        .expect("Failed to send register request");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse body");
    assert_eq!(body, json!({"error": "Username is required"}));
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login_returns_the_same_identity_with_a_fresh_token() {
    let ctx = TestContext::new().await;
    let registered = ctx.register("alice", "secret", "customer").await;

    let resp = ctx
        .client
        .post(ctx.url("/api/login"))
        .json(&json!({"username": "alice", "password": "secret"}))
        .send()
        .await
        .expect("Failed to send login request");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse body");

    assert_eq!(body["id"], registered["id"]);
    assert_eq!(body["username"], "alice");
    assert_eq!(body["role"], "customer");
    assert_ne!(body["token"], registered["token"]);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let ctx = TestContext::new().await;
    ctx.register("carol", "right-password", "customer").await;

    // Unknown username
    let unknown = ctx
        .client
        .post(ctx.url("/api/login"))
        .json(&json!({"username": "nobody", "password": "whatever"}))
        .send()
        .await
        .expect("Failed to send login request");
    let unknown_status = unknown.status();
    let unknown_body: Value = unknown.json().await.expect("Failed to parse body");

    // Known username, wrong password
    let wrong = ctx
        .client
        .post(ctx.url("/api/login"))
        .json(&json!({"username": "carol", "password": "wrong-password"}))
        .send()
        .await
        .expect("Failed to send login request");
    let wrong_status = wrong.status();
    let wrong_body: Value = wrong.json().await.expect("Failed to parse body");

    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_body, json!({"error": "Invalid credentials"}));
    assert_eq!(unknown_body, wrong_body);
}

// ============================================================================
// Logout
// ============================================================================

#[tokio::test]
async fn test_logout_revokes_the_token() {
    let ctx = TestContext::new().await;
    let session = ctx.register("alice", "secret", "merchant").await;
    let token = session["token"].as_str().expect("token");

    // The token works before logout
    let create = ctx
        .client
        .post(ctx.url("/api/products"))
        .bearer_auth(token)
        .json(&json!({"name": "Mug", "description": "Ceramic", "price": 9.99}))
        .send()
        .await
        .expect("Failed to create product");
    assert_eq!(create.status(), StatusCode::OK);

    let logout = ctx
        .client
        .post(ctx.url("/api/logout"))
        .bearer_auth(token)
        .send()
        .await
        .expect("Failed to send logout request");
    assert_eq!(logout.status(), StatusCode::NO_CONTENT);

    // And is dead afterwards
    let create = ctx
        .client
        .post(ctx.url("/api/products"))
        .bearer_auth(token)
        .json(&json!({"name": "Mug 2", "description": "Ceramic", "price": 9.99}))
        .send()
        .await
        .expect("Failed to create product");
    assert_eq!(create.status(), StatusCode::UNAUTHORIZED);
    let body: Value = create.json().await.expect("Failed to parse body");
    assert_eq!(body, json!({"error": "Invalid session"}));
}

#[tokio::test]
async fn test_logout_is_lenient_about_missing_or_stale_tokens() {
    let ctx = TestContext::new().await;

    // No Authorization header at all
    let resp = ctx
        .client
        .post(ctx.url("/api/logout"))
        .send()
        .await
        .expect("Failed to send logout request");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // A token the server has never seen
    let resp = ctx
        .client
        .post(ctx.url("/api/logout"))
        .bearer_auth("never-issued")
        .send()
        .await
        .expect("Failed to send logout request");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_endpoints() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .get(ctx.url("/health"))
        .send()
        .await
        .expect("Failed to get /health");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.expect("body"), "ok");

    let resp = ctx
        .client
        .get(ctx.url("/health/ready"))
        .send()
        .await
        .expect("Failed to get /health/ready");
    assert_eq!(resp.status(), StatusCode::OK);
}
