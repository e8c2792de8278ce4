//! Integration tests for the reqwest-backed site fetcher
//!
//! These tests verify what the network rules get to see:
//! - Final status and headers
//! - The final URL after redirects
//! - JSON decoding and its failure modes

use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use fps_check::error_handling::FetchError;
use fps_check::{HttpFetcher, SiteFetcher};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher() -> HttpFetcher {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .expect("Failed to build client");
    HttpFetcher::new(Arc::new(client))
}

#[tokio::test]
async fn test_fetch_reports_status_and_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).insert_header("X-Robots-Tag", "noindex, nofollow"))
        .mount(&server)
        .await;

    let response = fetcher().fetch(&server.uri()).await.expect("fetch succeeds");
    assert_eq!(response.status, 200);
    assert!(response.is_success());
    let tag = response
        .headers
        .get("x-robots-tag")
        .and_then(|v| v.to_str().ok());
    assert_eq!(tag, Some("noindex, nofollow"));
}

#[tokio::test]
async fn test_fetch_follows_redirects() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("Location", format!("{}/landing", server.uri())),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/landing"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let response = fetcher().fetch(&server.uri()).await.expect("fetch succeeds");
    assert_eq!(response.status, 200);
    assert_eq!(response.final_url, format!("{}/landing", server.uri()));
}

#[tokio::test]
async fn test_fetch_not_found_is_a_response() {
    let server = MockServer::start().await;
    let response = fetcher()
        .fetch(&format!("{}/ads.txt", server.uri()))
        .await
        .expect("404 is still a response");
    assert_eq!(response.status, 404);
    assert!(!response.is_success());
}

#[tokio::test]
async fn test_fetch_unreachable_is_transport_error() {
    // Nothing listens on a port the OS just handed out and took back
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind listener");
        listener.local_addr().expect("Failed to read address").port()
    };
    let result = fetcher().fetch(&format!("http://127.0.0.1:{port}")).await;
    assert!(
        matches!(result, Err(FetchError::Transport { .. })),
        "expected transport error, got {result:?}"
    );
}

#[tokio::test]
async fn test_fetch_json_success() {
    let server = MockServer::start().await;
    let document = json!({"primary": "https://primary.com", "associatedSites": ["https://associated1.com"]});
    Mock::given(method("GET"))
        .and(path("/.well-known/first-party-set.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(document.clone()))
        .mount(&server)
        .await;

    let value = fetcher()
        .fetch_json(&format!("{}/.well-known/first-party-set.json", server.uri()))
        .await
        .expect("json decodes");
    assert_eq!(value, document);
}

#[tokio::test]
async fn test_fetch_json_not_found() {
    let server = MockServer::start().await;
    let result = fetcher()
        .fetch_json(&format!("{}/.well-known/first-party-set.json", server.uri()))
        .await;
    assert!(matches!(result, Err(FetchError::Status { status: 404, .. })));
}

#[tokio::test]
async fn test_fetch_json_invalid_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/.well-known/first-party-set.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let result = fetcher()
        .fetch_json(&format!("{}/.well-known/first-party-set.json", server.uri()))
        .await;
    assert!(matches!(result, Err(FetchError::Decode { .. })));
}
