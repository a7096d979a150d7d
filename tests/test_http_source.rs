//! HTTP shard source against a mock web server.

mod fixtures;

use doxsearch::source::{HttpShardClient, HttpShardSource, ShardSource};
use doxsearch::{EngineOptions, QueryEngine, QueryOutcome, ShardKey, ShardStore, StoreError};
use fixtures::*;
use std::sync::Arc;
use std::time::Duration;

fn source_for(server: &mockito::Server) -> HttpShardSource {
    HttpShardSource::new(HttpShardClient::new(
        format!("{}/html/search", server.url()),
        Duration::from_secs(5),
    ))
}

#[test]
fn test_client_fetches_shard() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/html/search/functions_13.js")
        .with_status(200)
        .with_header("content-type", "application/javascript")
        .with_body(FUNCTIONS_T)
        .create();

    let client = HttpShardClient::new(format!("{}/html/search/", server.url()), Duration::from_secs(5));
    let text = client
        .get_shard(&ShardKey::parse("functions_13").unwrap())
        .unwrap();

    assert_eq!(text, FUNCTIONS_T);
    mock.assert();
}

#[test]
fn test_client_not_found() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/html/search/functions_0.js")
        .with_status(404)
        .create();

    let client = HttpShardClient::new(format!("{}/html/search", server.url()), Duration::from_secs(5));
    let err = client
        .get_shard(&ShardKey::parse("functions_0").unwrap())
        .unwrap_err();

    assert_eq!(err, StoreError::ShardNotFound("functions_0".to_string()));
}

#[test]
fn test_client_server_error_is_transport() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/html/search/functions_13.js")
        .with_status(503)
        .create();

    let client = HttpShardClient::new(format!("{}/html/search", server.url()), Duration::from_secs(5));
    let err = client
        .get_shard(&ShardKey::parse("functions_13").unwrap())
        .unwrap_err();

    assert!(matches!(err, StoreError::Transport { .. }));
    assert!(!err.is_permanent());
}

#[test]
fn test_client_missing_manifest() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/html/search/searchdata.js")
        .with_status(404)
        .create();

    let client = HttpShardClient::new(format!("{}/html/search", server.url()), Duration::from_secs(5));
    assert!(matches!(
        client.get_manifest(),
        Err(StoreError::ManifestUnavailable(_))
    ));
}

#[tokio::test]
async fn test_engine_over_http() {
    let mut server = mockito::Server::new_async().await;
    let manifest = server
        .mock("GET", "/html/search/searchdata.js")
        .with_body(MANIFEST)
        .expect(1)
        .create_async()
        .await;
    let functions = server
        .mock("GET", "/html/search/functions_13.js")
        .with_body(FUNCTIONS_T)
        .expect(1)
        .create_async()
        .await;
    let classes = server
        .mock("GET", "/html/search/classes_13.js")
        .with_status(404)
        .expect(1)
        .create_async()
        .await;

    let store = Arc::new(ShardStore::new(Arc::new(source_for(&server))));
    let engine = QueryEngine::new(store, EngineOptions::default());

    let outcome = engine.evaluate("tim").await;
    assert_eq!(labels(&outcome), vec!["time", "timedwait", "Timer", "Timer"]);

    // Served from cache, including the missing classes shard
    assert_eq!(engine.evaluate("tiff").await.rows().len(), 2);

    manifest.assert_async().await;
    functions.assert_async().await;
    classes.assert_async().await;
}

#[tokio::test]
async fn test_unreachable_server_is_no_index() {
    let source = HttpShardSource::new(HttpShardClient::new(
        "http://127.0.0.1:9/search",
        Duration::from_millis(200),
    ));
    assert!(source.describe().starts_with("http "));

    let store = Arc::new(ShardStore::new(Arc::new(source)));
    let engine = QueryEngine::new(store, EngineOptions::default());
    assert_eq!(engine.evaluate("tim").await, QueryOutcome::NoIndexAvailable);
}
