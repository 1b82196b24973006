//! HTTP seed loader against a mock endpoint

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use serde_json::json;
use std::time::Duration;
use todos::{HttpSeedLoader, ItemStore, SeedFetchError, SeedLoader, TodoId, TodoItem};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn page() -> serde_json::Value {
    json!({
        "todos": [
            { "id": 1, "todo": "Do something nice for someone you care about", "completed": false, "userId": 152 },
            { "id": 2, "todo": "Memorize a poem", "completed": true, "userId": 13 }
        ],
        "total": 254,
        "skip": 0,
        "limit": 2
    })
}

#[tokio::test]
async fn test_fetches_and_maps_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/todos"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page()))
        .expect(1)
        .mount(&server)
        .await;

    let loader = HttpSeedLoader::new(server.uri(), 10);
    let items = tokio_test::assert_ok!(loader.fetch_seed_todos().await);

    assert_eq!(items, vec![
        TodoItem::new(TodoId(1), "Do something nice for someone you care about").with_owner_tag(152),
        TodoItem::new(TodoId(2), "Memorize a poem")
            .with_completed(true)
            .with_owner_tag(13),
    ]);
}

#[tokio::test]
async fn test_non_success_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/todos"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = HttpSeedLoader::new(server.uri(), 10).fetch_seed_todos().await;
    assert_eq!(result, Err(SeedFetchError::Status { status: 500 }));
}

#[tokio::test]
async fn test_malformed_body_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/todos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .mount(&server)
        .await;

    let result = HttpSeedLoader::new(server.uri(), 10).fetch_seed_todos().await;
    assert!(matches!(result, Err(SeedFetchError::Parse(_))));
}

#[tokio::test]
async fn test_store_seeds_from_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/todos"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page()))
        .expect(1)
        .mount(&server)
        .await;

    let store = ItemStore::launch(HttpSeedLoader::new(server.uri(), 2)).await.unwrap();
    store.wait_for_seed(Duration::from_secs(5)).await.unwrap();

    let state = store.snapshot();
    assert_eq!(state.items.len(), 2);
    assert_eq!(state.load_error, None);
    assert_eq!(state.completed_count(), 1);
}

#[tokio::test]
async fn test_store_reports_http_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let store = ItemStore::launch(HttpSeedLoader::new(server.uri(), 10)).await.unwrap();
    store.wait_for_seed(Duration::from_secs(5)).await.unwrap();

    let state = store.snapshot();
    assert!(state.items.is_empty());
    assert!(!state.is_loading);
    assert_eq!(state.load_error.as_deref(), Some("Failed to fetch todos"));
}
