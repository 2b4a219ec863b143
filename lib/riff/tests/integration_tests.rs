//! Integration tests for `HyperClient` using wiremock.

use riff::{HttpClient, HyperClient, Method, Request};
use serde::{Deserialize, Serialize};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Playlist {
    id: String,
    name: String,
}

#[tokio::test]
async fn test_get_request() {
    let mock_server = MockServer::start().await;

    let playlist = Playlist {
        id: "abc123".to_string(),
        name: "Road trip".to_string(),
    };

    Mock::given(method("GET"))
        .and(path("/playlists/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&playlist))
        .mount(&mock_server)
        .await;

    let client = HyperClient::new();
    let url = url::Url::parse(&format!("{}/playlists/abc123", mock_server.uri())).expect("url");
    let request = Request::builder(Method::Get, url)
        .header("Accept", "application/json")
        .build();

    let response = client.execute(request).await.expect("response");

    assert!(response.is_success());
    assert_eq!(response.status(), 200);

    let body: Playlist = response.json().expect("json");
    assert_eq!(body, playlist);
}

#[tokio::test]
async fn test_post_request_with_json_body() {
    let mock_server = MockServer::start().await;

    let input = serde_json::json!({"name": "Road trip", "public": false});
    let output = Playlist {
        id: "p42".to_string(),
        name: "Road trip".to_string(),
    };

    Mock::given(method("POST"))
        .and(path("/users/alice/playlists"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(&input))
        .respond_with(ResponseTemplate::new(201).set_body_json(&output))
        .mount(&mock_server)
        .await;

    let client = HyperClient::new();
    let url =
        url::Url::parse(&format!("{}/users/alice/playlists", mock_server.uri())).expect("url");
    let request = Request::builder(Method::Post, url)
        .json(&input)
        .expect("json body")
        .build();

    let response = client.execute(request).await.expect("response");

    assert_eq!(response.status(), 201);
    let body: Playlist = response.json().expect("json");
    assert_eq!(body, output);
}

#[tokio::test]
async fn test_http_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/not-found"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&mock_server)
        .await;

    let client = HyperClient::new();
    let url = url::Url::parse(&format!("{}/not-found", mock_server.uri())).expect("url");
    let request = Request::builder(Method::Get, url).build();

    let response = client.execute(request).await.expect("response");

    assert!(response.is_client_error());
    assert_eq!(response.status(), 404);
    assert_eq!(response.text(), "Not Found");
}

#[tokio::test]
async fn test_user_agent_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header("User-Agent", "riff-tests"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HyperClient::builder().user_agent("riff-tests").build();
    let url = url::Url::parse(&format!("{}/me", mock_server.uri())).expect("url");
    let request = Request::builder(Method::Get, url).build();

    let response = client.execute(request).await.expect("response");

    assert!(response.is_success());
}

#[tokio::test]
async fn test_timeout() {
    let mock_server = MockServer::start().await;

    // Delay longer than client timeout
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(std::time::Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let client = HyperClient::builder()
        .timeout(std::time::Duration::from_millis(100))
        .build();

    let url = url::Url::parse(&format!("{}/slow", mock_server.uri())).expect("url");
    let request = Request::builder(Method::Get, url).build();

    let result = client.execute(request).await;

    let err = result.expect_err("expected timeout error");
    assert!(err.is_timeout(), "Expected timeout error, got: {err}");
}

#[tokio::test]
async fn test_connection_error() {
    let client = HyperClient::new();

    // Nothing listens on port 1
    let url = url::Url::parse("http://127.0.0.1:1").expect("url");
    let request = Request::builder(Method::Get, url).build();

    let result = client.execute(request).await;

    let err = result.expect_err("expected connection error");
    assert!(err.is_connection(), "Expected connection error, got: {err}");
}

#[tokio::test]
async fn test_response_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/with-headers"))
        .respond_with(ResponseTemplate::new(200).insert_header("X-Request-Id", "r-1"))
        .mount(&mock_server)
        .await;

    let client = HyperClient::new();
    let url = url::Url::parse(&format!("{}/with-headers", mock_server.uri())).expect("url");
    let request = Request::builder(Method::Get, url).build();

    let response = client.execute(request).await.expect("response");

    assert_eq!(response.header("x-request-id"), Some("r-1"));
}

#[tokio::test]
async fn test_delete_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/playlists/abc123/followers"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let client = HyperClient::new();
    let url = url::Url::parse(&format!("{}/playlists/abc123/followers", mock_server.uri()))
        .expect("url");
    let request = Request::builder(Method::Delete, url).build();

    let response = client.execute(request).await.expect("response");

    assert!(response.is_success());
}
