//! Test helper utilities for driving the router in-process

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use job_search_proxy::app_state::AppState;
use job_search_proxy::config::AppConfig;
use job_search_proxy::routes::build_router;
use job_search_proxy::services::automation::AutomationClient;

pub const TEST_API_KEY: &str = "sk-test-key";
pub const RUN_SSE_PATH: &str = "/v1/automation/run-sse";

/// Response captured from a single router call.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("Response body is not JSON")
    }
}

/// Router wired to an automation service at `base_url`.
pub fn test_app(base_url: &str) -> Router {
    let config = AppConfig::with_api_key(TEST_API_KEY, base_url);
    let automation = AutomationClient::new(&config.automation_api_key, &config.automation_base_url)
        .expect("Failed to build automation client");
    let prometheus = PrometheusBuilder::new().build_recorder().handle();

    build_router(AppState::new(config, automation), Arc::new(prometheus))
}

pub async fn send(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.expect("Router call failed");
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body")
        .to_vec();

    TestResponse {
        status,
        headers,
        body,
    }
}

pub fn search_request(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/jobs")
        .header("content-type", "application/json")
        .header("origin", "https://careers.example.com")
        .body(Body::from(body.to_string()))
        .expect("Failed to build request")
}

/// Serve `body` as the SSE stream for every run request.
pub async fn mount_stream(server: &MockServer, body: String) {
    Mock::given(method("POST"))
        .and(path(RUN_SSE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .mount(server)
        .await;
}

/// Fail the test if the automation service is called at all.
pub async fn forbid_upstream(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(RUN_SSE_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(server)
        .await;
}
