//! Integration tests for the HTTP client functionality.
//!
//! These tests verify request building, the headers sent on the wire, and
//! the request metadata captured alongside each response.

use rebrandly_api::clients::{ApiHost, HttpClient, HttpMethod, HttpRequest};
use rebrandly_api::{ApiKey, HostUrl, InvalidHttpRequestError, RebrandlyConfig, WorkspaceId};
use serde_json::json;
use wiremock::matchers::{header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_config(host: &str) -> RebrandlyConfig {
    RebrandlyConfig::builder()
        .api_key(ApiKey::new("test-key").unwrap())
        .workspace(WorkspaceId::new("ws-1").unwrap())
        .api_host(HostUrl::new(host).unwrap())
        .enterprise_host(HostUrl::new(host).unwrap())
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_full_workflow_config_to_client_to_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/links"))
        .and(header("apikey", "test-key"))
        .and(header("workspace", "ws-1"))
        .and(header("accept", "application/json"))
        .and(header_exists("user-agent"))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(&create_config(&server.uri())).unwrap();
    let request = HttpRequest::builder(HttpMethod::Get, "links")
        .query_param("limit", "50")
        .build()
        .unwrap();

    let response = client.request(request).await.unwrap();

    assert_eq!(response.code, 200);
    assert_eq!(response.request.method, HttpMethod::Get);
    assert_eq!(response.request.path, "/v1/links");
    assert_eq!(response.request.url.query(), Some("limit=50"));
}

#[test]
fn test_invalid_request_produces_correct_error() {
    let result = HttpRequest::builder(HttpMethod::Post, "links").build();
    assert!(matches!(
        result,
        Err(InvalidHttpRequestError::MissingBody { .. })
    ));

    let result = HttpRequest::builder(HttpMethod::Put, "links").build();
    assert!(result.is_err());

    let result = HttpRequest::builder(HttpMethod::Delete, "links")
        .body(json!({"links": ["a"]}))
        .build();
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_enterprise_requests_use_enterprise_host() {
    let standard = MockServer::start().await;
    let enterprise = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v1/links"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&enterprise)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&standard)
        .await;

    let config = RebrandlyConfig::builder()
        .api_key(ApiKey::new("test-key").unwrap())
        .api_host(HostUrl::new(standard.uri()).unwrap())
        .enterprise_host(HostUrl::new(enterprise.uri()).unwrap())
        .build()
        .unwrap();
    let client = HttpClient::new(&config).unwrap();

    let request = HttpRequest::builder(HttpMethod::Put, "links")
        .host(ApiHost::Enterprise)
        .body(json!([]))
        .build()
        .unwrap();
    let response = client.request(request).await.unwrap();

    assert_eq!(response.code, 200);
}

#[tokio::test]
async fn test_get_url_reissues_captured_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/links"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "a"}])))
        .expect(2)
        .mount(&server)
        .await;

    let client = HttpClient::new(&create_config(&server.uri())).unwrap();
    let request = HttpRequest::builder(HttpMethod::Get, "links")
        .query_param("limit", "1")
        .build()
        .unwrap();

    let first = client.request(request).await.unwrap();
    let second = client.get_url(first.request.url.clone()).await.unwrap();

    assert_eq!(first.raw_body, second.raw_body);
    assert_eq!(first.request, second.request);
}
