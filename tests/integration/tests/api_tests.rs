//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance the configured user may create tables in
//! - Environment variables: DEMO_DB_USERNAME, DEMO_DB_PASSWORD, DEMO_DB_CONNECT_STRING
//!
//! Run with: cargo test -p integration-tests --test api_tests

use demo_common::PoolWaitPolicy;
use integration_tests::{
    assert_json, assert_status, assert_text, check_test_env, fixtures::*, test_config,
    TestServer,
};
use reqwest::StatusCode;
use tokio::task::JoinSet;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    let health: HealthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(health.status, "ok");
    assert!(!health.version.is_empty());
    server.shutdown().await;
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let ready: ReadinessResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(ready.status, "ready");
    assert!(ready.database);
    server.shutdown().await;
}

// ============================================================================
// Demo Route Tests
// ============================================================================

#[tokio::test]
async fn test_index() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let body = server.get_text("/").await.unwrap();

    assert_eq!(body, "Welcome to the demo app");
    server.shutdown().await;
}

#[tokio::test]
async fn test_fresh_start_insert_then_lookup() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    // Bootstrap leaves only the seed row, so the first insert gets id 2
    assert_eq!(server.get_text("/user/1").await.unwrap(), "chris");
    assert_eq!(
        server.get_text("/post/fred").await.unwrap(),
        "Inserted fred with id 2"
    );
    assert_eq!(server.get_text("/user/2").await.unwrap(), "fred");

    server.shutdown().await;
}

#[tokio::test]
async fn test_restart_resets_table() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    server.get_text("/post/temporary").await.unwrap();
    server.shutdown().await;

    let server = TestServer::start().await.expect("Failed to restart server");
    assert_eq!(server.get_text("/user/2").await.unwrap(), "Unknown user id");
    assert_eq!(server.get_text("/user/1").await.unwrap(), "chris");
    server.shutdown().await;
}

#[tokio::test]
async fn test_unknown_user_id() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/user/999").await.unwrap();
    let body = assert_text(response, StatusCode::OK).await.unwrap();

    assert_eq!(body, "Unknown user id");
    server.shutdown().await;
}

#[tokio::test]
async fn test_inserted_ids_are_distinct_under_load() {
    if !check_test_env().await {
        return;
    }

    let mut config = test_config().unwrap();
    config.database.pool.wait_policy = PoolWaitPolicy::Wait;
    let server = TestServer::start_with_config(config)
        .await
        .expect("Failed to start server");

    // More concurrent requests than pooled connections; the extras wait
    let mut tasks = JoinSet::new();
    for _ in 0..12 {
        let client = server.client.clone();
        let username = unique_username();
        let url = format!("{}/post/{username}", server.base_url());
        tasks.spawn(async move {
            let body = client.get(&url).send().await?.text().await?;
            Ok::<_, reqwest::Error>((username, body))
        });
    }

    let mut results = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        results.push(joined.unwrap().unwrap());
    }

    let mut ids = Vec::new();
    for (username, body) in results {
        let id = inserted_id(&body).expect("id in response");
        assert_eq!(server.get_text(&format!("/user/{id}")).await.unwrap(), username);
        ids.push(id);
    }
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 12);
    let status = server.pool().status();
    assert!(status.size <= status.max);
    assert_eq!(status.checked_out, 0);

    server.shutdown().await;
}

// ============================================================================
// Error Tests
// ============================================================================

#[tokio::test]
async fn test_non_integer_id_is_bad_request() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/user/abc").await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();

    assert_eq!(body.error.code, "INVALID_PATH_PARAMETER");
    assert!(!body.error.message.is_empty());
    server.shutdown().await;
}

#[tokio::test]
async fn test_overlong_username_is_bad_request() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let path = format!("/post/{}", "x".repeat(41));
    let response = server.get(&path).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    // Nothing was inserted
    assert_eq!(server.get_text("/user/2").await.unwrap(), "Unknown user id");
    server.shutdown().await;
}
