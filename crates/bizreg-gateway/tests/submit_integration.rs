//! End-to-end tests for the submission gateway.
//!
//! These drive the full router through `axum-test`, with the upstream
//! service played either by a scripted in-process client or by a real
//! wiremock HTTP server.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::http::{HeaderName, HeaderValue, Method, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bizreg_gateway::{create_router, AppState, GatewayConfig};
use bizreg_upstream::{
    HttpSubmitClient, SubmitClient, SubmitPayload, UpstreamConfig, UpstreamError, UpstreamOutcome,
};

// =============================================================================
// Test Doubles & Helpers
// =============================================================================

/// A `SubmitClient` that always returns the same outcome and counts calls.
struct ScriptedClient {
    status: u16,
    body: Value,
    calls: AtomicUsize,
}

impl ScriptedClient {
    fn new(status: u16, body: Value) -> Arc<Self> {
        Arc::new(Self {
            status,
            body,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SubmitClient for ScriptedClient {
    async fn send(
        &self,
        _payload: &SubmitPayload,
        _idempotency_key: Option<&str>,
    ) -> Result<UpstreamOutcome, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(UpstreamOutcome {
            status: self.status,
            body: self.body.clone(),
        })
    }
}

fn scripted_server(client: Arc<ScriptedClient>) -> TestServer {
    let state = AppState::new(client, GatewayConfig::default());
    TestServer::new(create_router(state)).unwrap()
}

/// A server backed by a real `HttpSubmitClient` pointed at `upstream_url`,
/// with test-speed timeouts (100 ms attempts, 10 ms backoff, 2 retries).
fn http_server(upstream_url: String) -> TestServer {
    let upstream = UpstreamConfig {
        attempt_timeout: Duration::from_millis(100),
        backoff_base: Duration::from_millis(10),
        ..UpstreamConfig::new(upstream_url)
    };
    let client = Arc::new(HttpSubmitClient::new(upstream));
    let state = AppState::new(client, GatewayConfig::default());
    TestServer::new(create_router(state)).unwrap()
}

fn valid_body() -> Value {
    json!({
        "business": {
            "businessName": "Acme Co",
            "businessType": "LLC",
            "address1": "1 Main St",
            "city": "Springfield",
            "state": "CA",
            "zip": "90210"
        },
        "contact": {
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "countryCode": "+1",
            "phone": "(415) 555-0100"
        }
    })
}

const REGISTRATIONS: &str = "/v1/registrations";

// =============================================================================
// Success & Mapping
// =============================================================================

#[tokio::test]
async fn valid_submission_relays_upstream_message() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/company"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "ok", "message": "Welcome aboard"})),
        )
        .expect(1)
        .mount(&mock)
        .await;

    let server = http_server(format!("{}/company", mock.uri()));
    let response = server.post(REGISTRATIONS).json(&valid_body()).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["message"], "Welcome aboard");
}

#[tokio::test]
async fn valid_submission_without_upstream_message_uses_default() {
    let client = ScriptedClient::new(200, json!({"status": "ok"}));
    let server = scripted_server(Arc::clone(&client));

    let response = server.post(REGISTRATIONS).json(&valid_body()).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(
        body["message"],
        "Thanks for submitting your company! We’ll be in touch shortly."
    );
    assert_eq!(client.calls(), 1);
}

#[tokio::test]
async fn upstream_logical_error_is_http_ok_with_error_status() {
    let client = ScriptedClient::new(
        200,
        json!({"status": "error", "message": "Company already registered"}),
    );
    let server = scripted_server(client);

    let response = server.post(REGISTRATIONS).json(&valid_body()).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Company already registered");
}

#[tokio::test]
async fn upstream_server_error_maps_to_bad_gateway() {
    let client = ScriptedClient::new(503, json!({"status": "error", "message": "boom"}));
    let server = scripted_server(client);

    let response = server.post(REGISTRATIONS).json(&valid_body()).await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    let body: Value = response.json();
    assert_eq!(body["status"], "error");
    // Upstream internals are not leaked.
    assert_eq!(body["message"], "Upstream error. Try again.");
}

#[tokio::test]
async fn transport_failure_after_retries_maps_to_gateway_timeout() {
    let mock = MockServer::start().await;
    // Delay past the 100 ms attempt timeout on every attempt; with 2
    // retries the gateway makes exactly 3 attempts before giving up.
    Mock::given(method("POST"))
        .and(path("/company"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "ok"}))
                .set_delay(Duration::from_millis(500)),
        )
        .expect(3)
        .mount(&mock)
        .await;

    let server = http_server(format!("{}/company", mock.uri()));
    let response = server.post(REGISTRATIONS).json(&valid_body()).await;

    assert_eq!(response.status_code(), StatusCode::GATEWAY_TIMEOUT);
    let body: Value = response.json();
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Network timeout. Try again.");
    mock.verify().await;
}

// =============================================================================
// Local Rejections
// =============================================================================

#[tokio::test]
async fn blocklisted_business_name_never_reaches_upstream() {
    let client = ScriptedClient::new(200, json!({"status": "ok"}));
    let server = scripted_server(Arc::clone(&client));

    let mut body = valid_body();
    body["business"]["businessName"] = json!("Partner of SanCrisoft LLC");
    let response = server.post(REGISTRATIONS).json(&body).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let json: Value = response.json();
    assert_eq!(json["status"], "error");
    assert_eq!(
        json["message"],
        "A company with the same name has been detected. Please change the information entered."
    );
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn invalid_payload_returns_field_errors() {
    let client = ScriptedClient::new(200, json!({"status": "ok"}));
    let server = scripted_server(Arc::clone(&client));

    let mut body = valid_body();
    body["business"]["zip"] = json!("1234");
    body["contact"]["phone"] = json!("555-1234");
    body["business"]["businessName"] = json!("   ");
    let response = server.post(REGISTRATIONS).json(&body).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let json: Value = response.json();
    assert_eq!(json["status"], "error");
    assert_eq!(json["details"]["zip"], "Zip must be 5 digits");
    assert_eq!(json["details"]["phone"], "Phone must be (000) 000-0000");
    assert_eq!(json["details"]["businessName"], "Required");
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn malformed_json_body_is_a_bad_request() {
    let client = ScriptedClient::new(200, json!({"status": "ok"}));
    let server = scripted_server(Arc::clone(&client));

    let response = server.post(REGISTRATIONS).text("{not json").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let json: Value = response.json();
    assert_eq!(json["status"], "error");
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn rate_limit_denies_request_over_quota() {
    let client = ScriptedClient::new(200, json!({"status": "ok"}));
    let server = scripted_server(Arc::clone(&client));
    let forwarded_for = HeaderName::from_static("x-forwarded-for");
    let identity = HeaderValue::from_static("203.0.113.9");

    for i in 0..50 {
        let response = server
            .post(REGISTRATIONS)
            .add_header(forwarded_for.clone(), identity.clone())
            .json(&valid_body())
            .await;
        assert_eq!(
            response.status_code(),
            StatusCode::OK,
            "request {i} should be admitted"
        );
    }

    let response = server
        .post(REGISTRATIONS)
        .add_header(forwarded_for, identity)
        .json(&valid_body())
        .await;

    assert_eq!(response.status_code(), StatusCode::TOO_MANY_REQUESTS);
    let json: Value = response.json();
    assert_eq!(json["status"], "error");
    assert_eq!(json["message"], "Too many requests. Try again later.");
    assert!(response.headers().get("retry-after").is_some());
    assert_eq!(client.calls(), 50);
}

#[tokio::test]
async fn rate_limit_is_per_identity() {
    let client = ScriptedClient::new(200, json!({"status": "ok"}));
    let state = AppState::new(
        Arc::clone(&client),
        GatewayConfig {
            rate_limit_quota: 1,
            ..GatewayConfig::default()
        },
    );
    let server = TestServer::new(create_router(state)).unwrap();
    let forwarded_for = HeaderName::from_static("x-forwarded-for");

    for ip in ["203.0.113.1", "203.0.113.2", "203.0.113.3"] {
        let response = server
            .post(REGISTRATIONS)
            .add_header(forwarded_for.clone(), HeaderValue::from_static(ip))
            .json(&valid_body())
            .await;
        assert_eq!(response.status_code(), StatusCode::OK, "first from {ip}");
    }

    let response = server
        .post(REGISTRATIONS)
        .add_header(
            forwarded_for,
            HeaderValue::from_static("203.0.113.1"),
        )
        .json(&valid_body())
        .await;
    assert_eq!(response.status_code(), StatusCode::TOO_MANY_REQUESTS);
}

// =============================================================================
// Idempotency
// =============================================================================

#[tokio::test]
async fn duplicate_submission_with_token_replays_cached_outcome() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/company"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "ok", "message": "first"})),
        )
        .expect(1)
        .mount(&mock)
        .await;

    let server = http_server(format!("{}/company", mock.uri()));
    let key = HeaderName::from_static("idempotency-key");
    let token = HeaderValue::from_static("click-42");

    let first = server
        .post(REGISTRATIONS)
        .add_header(key.clone(), token.clone())
        .json(&valid_body())
        .await;
    let second = server
        .post(REGISTRATIONS)
        .add_header(key, token)
        .json(&valid_body())
        .await;

    assert_eq!(first.status_code(), StatusCode::OK);
    assert_eq!(second.status_code(), StatusCode::OK);
    assert_eq!(first.json::<Value>(), second.json::<Value>());
    mock.verify().await;
}

#[tokio::test]
async fn submissions_without_token_always_reach_upstream() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/company"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .expect(2)
        .mount(&mock)
        .await;

    let server = http_server(format!("{}/company", mock.uri()));
    server.post(REGISTRATIONS).json(&valid_body()).await;
    server.post(REGISTRATIONS).json(&valid_body()).await;
    mock.verify().await;
}

// =============================================================================
// Methods, Preflight & Auxiliary Routes
// =============================================================================

#[tokio::test]
async fn non_post_method_gets_structured_405() {
    let client = ScriptedClient::new(200, json!({"status": "ok"}));
    let server = scripted_server(client);

    let response = server.get(REGISTRATIONS).await;

    assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);
    let json: Value = response.json();
    assert_eq!(json["status"], "error");
    assert_eq!(json["message"], "Method Not Allowed");
}

#[tokio::test]
async fn options_returns_204_with_cors_headers() {
    let client = ScriptedClient::new(200, json!({"status": "ok"}));
    let server = scripted_server(client);

    let response = server.method(Method::OPTIONS, REGISTRATIONS).await;

    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
    let headers = response.headers();
    assert_eq!(headers.get("access-control-allow-origin").unwrap(), "*");
    assert_eq!(
        headers.get("access-control-allow-methods").unwrap(),
        "POST, OPTIONS"
    );
    assert_eq!(
        headers.get("access-control-allow-headers").unwrap(),
        "Content-Type, Idempotency-Key"
    );
    assert!(response.text().is_empty());
}

#[tokio::test]
async fn countries_endpoint_serves_static_table() {
    let client = ScriptedClient::new(200, json!({"status": "ok"}));
    let server = scripted_server(client);

    let response = server.get("/v1/countries").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let json: Value = response.json();
    let countries = json["countries"].as_array().unwrap();
    assert_eq!(countries.len(), 10);
    assert_eq!(countries[0]["dial_code"], "+1");
}

#[tokio::test]
async fn health_endpoint_is_public() {
    let client = ScriptedClient::new(200, json!({"status": "ok"}));
    let server = scripted_server(client);

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let json: Value = response.json();
    assert_eq!(json["status"], "healthy");
}
