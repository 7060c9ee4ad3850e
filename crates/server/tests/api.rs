//! HTTP-level tests for the form, prediction, and operational endpoints,
//! run against the fixture artifacts with `tower::ServiceExt::oneshot`.

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use metrics_exporter_prometheus::PrometheusBuilder;
use model::{ModelError, DEFAULT_MODEL_PATH, DEFAULT_VECTORIZER_PATH};
use serde_json::{json, Value};
use server::{build_router, ServerConfig, ServerError, ServerState};
use tower::ServiceExt;

const FORM: &str = "application/x-www-form-urlencoded";
const JSON: &str = "application/json";

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../fixtures")
}

fn test_config() -> ServerConfig {
    ServerConfig {
        model_path: fixtures_dir().join(DEFAULT_MODEL_PATH),
        vectorizer_path: fixtures_dir().join(DEFAULT_VECTORIZER_PATH),
        ..Default::default()
    }
}

fn app_with(config: ServerConfig) -> Router {
    let state = ServerState::new(config).expect("fixture artifacts load");
    build_router(Arc::new(state))
}

fn app() -> Router {
    app_with(test_config())
}

struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl TestResponse {
    fn text(&self) -> String {
        String::from_utf8(self.body.to_vec()).expect("utf-8 body")
    }

    fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("JSON body")
    }
}

async fn send(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.expect("infallible router");
    let status = response.status();
    let headers = response.headers().clone();
    let body = response
        .into_body()
        .collect()
        .await
        .expect("readable body")
        .to_bytes();
    TestResponse {
        status,
        headers,
        body,
    }
}

fn post(uri: &str, content_type: Option<&str>, body: impl Into<Body>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::POST).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    builder.body(body.into()).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

const BOUNDARY: &str = "review-boundary-7MA4YWxk";

/// A `multipart/form-data` request carrying `fields` as text parts.
fn post_multipart(uri: &str, fields: &[(&str, &str)]) -> Request<Body> {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));
    let content_type = format!("multipart/form-data; boundary={BOUNDARY}");
    post(uri, Some(content_type.as_str()), body)
}

/// Url-encoded form body of roughly `bytes` length.
fn oversized_form(bytes: usize) -> String {
    format!("review_text={}", "good+".repeat(bytes / 5))
}

// ── HTML form ───────────────────────────────────────────────────────────

#[tokio::test]
async fn home_renders_empty_form() {
    let res = send(app(), get("/")).await;
    assert_eq!(res.status, StatusCode::OK);
    let page = res.text();
    assert!(page.contains("<form"));
    assert!(page.contains("name=\"review_text\""));
    assert!(!page.contains("Positive"));
    assert!(!page.contains("Negative"));
}

#[tokio::test]
async fn home_positive_review() {
    let res = send(
        app(),
        post("/", Some(FORM), "review_text=I+love+this+movie"),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.text().contains("<strong>Positive</strong>"));
}

#[tokio::test]
async fn home_negative_review() {
    let res = send(
        app(),
        post("/", Some(FORM), "review_text=This+movie+was+terrible"),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.text().contains("<strong>Negative</strong>"));
}

#[tokio::test]
async fn home_blank_review_shows_error() {
    for body in ["review_text=", "review_text=+++%09%0A", "other=1"] {
        let res = send(app(), post("/", Some(FORM), body)).await;
        assert_eq!(res.status, StatusCode::OK, "body: {body}");
        let page = res.text();
        assert!(page.contains("Please enter a valid review."), "body: {body}");
        assert!(!page.contains("<strong>"), "body: {body}");
    }
}

#[tokio::test]
async fn home_non_form_body_counts_as_missing() {
    let res = send(
        app(),
        post("/", Some(JSON), r#"{"review_text": "I love this movie"}"#),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.text().contains("Please enter a valid review."));
}

#[tokio::test]
async fn home_repeated_field_uses_first_value() {
    let res = send(
        app(),
        post("/", Some(FORM), "review_text=I+love+this+movie&review_text=awful"),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);
    let page = res.text();
    assert!(page.contains("<strong>Positive</strong>"));
    assert!(page.contains("I love this movie"));
}

#[tokio::test]
async fn home_accepts_multipart_form() {
    let res = send(
        app(),
        post_multipart("/", &[("title", "x"), ("review_text", "I love this movie")]),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.text().contains("<strong>Positive</strong>"));

    let res = send(app(), post_multipart("/", &[("title", "x")])).await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.text().contains("Please enter a valid review."));
}

#[tokio::test]
async fn home_unreadable_body_shows_generic_error() {
    let config = ServerConfig {
        max_body_size_mb: 1,
        ..test_config()
    };
    let res = send(
        app_with(config),
        post("/", Some(FORM), oversized_form(2 * 1024 * 1024)),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);
    let page = res.text();
    assert!(page.contains("An error occurred during prediction. Please try again."));
    assert!(!page.contains("<strong>"));

    let res = send(app(), post("/", Some("multipart/form-data"), "no boundary")).await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res
        .text()
        .contains("An error occurred during prediction. Please try again."));
}

#[tokio::test]
async fn home_escapes_submitted_text() {
    let res = send(
        app(),
        post(
            "/",
            Some(FORM),
            "review_text=%3Cscript%3Ealert(1)%3C%2Fscript%3E+love",
        ),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);
    let page = res.text();
    assert!(!page.contains("<script>"));
    assert!(page.contains("&lt;script&gt;"));
    assert!(page.contains("<strong>Positive</strong>"));
}

// ── JSON API ────────────────────────────────────────────────────────────

#[tokio::test]
async fn predict_json_positive() {
    let body = json!({"review_text": "An amazing, excellent movie"}).to_string();
    let res = send(app(), post("/predict", Some(JSON), body)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json(), json!({"sentiment_prediction": "positive"}));
}

#[tokio::test]
async fn predict_json_negative() {
    let body = json!({"review_text": "What a waste of time. Awful!"}).to_string();
    let res = send(app(), post("/predict", Some(JSON), body)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json(), json!({"sentiment_prediction": "negative"}));
}

#[tokio::test]
async fn predict_is_deterministic() {
    let body = json!({"review_text": "The best movie I have seen"}).to_string();
    let first = send(app(), post("/predict", Some(JSON), body.clone())).await;
    let second = send(app(), post("/predict", Some(JSON), body)).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.json(), second.json());
}

#[tokio::test]
async fn predict_accepts_json_variants() {
    for content_type in [
        "application/json; charset=utf-8",
        "application/vnd.api+json",
    ] {
        let body = json!({"review_text": "I love this movie"}).to_string();
        let res = send(app(), post("/predict", Some(content_type), body)).await;
        assert_eq!(res.status, StatusCode::OK, "content type: {content_type}");
        assert_eq!(res.json()["sentiment_prediction"], "positive");
    }
}

#[tokio::test]
async fn predict_accepts_form_body() {
    let res = send(
        app(),
        post("/predict", Some(FORM), "review_text=Bad.+Bad.+Bad."),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json(), json!({"sentiment_prediction": "negative"}));
}

#[tokio::test]
async fn predict_repeated_field_uses_first_value() {
    let res = send(
        app(),
        post(
            "/predict",
            Some(FORM),
            "review_text=I+love+this+movie&review_text=awful",
        ),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json(), json!({"sentiment_prediction": "positive"}));
}

#[tokio::test]
async fn predict_accepts_multipart_form() {
    let res = send(
        app(),
        post_multipart("/predict", &[("review_text", "I love this movie")]),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json(), json!({"sentiment_prediction": "positive"}));

    let res = send(
        app(),
        post_multipart("/predict", &[("review_text", "  ")]),
    )
    .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json(), json!({"error": "Please provide a valid review."}));
}

#[tokio::test]
async fn predict_unreadable_multipart_is_500() {
    let res = send(
        app(),
        post("/predict", Some("multipart/form-data"), "no boundary"),
    )
    .await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    let error = res.json()["error"].as_str().unwrap_or_default().to_string();
    assert!(!error.is_empty());
}

#[tokio::test]
async fn predict_blank_review_is_400() {
    let cases = [
        (Some(JSON), json!({"review_text": "   "}).to_string()),
        (Some(JSON), json!({"review_text": ""}).to_string()),
        (Some(JSON), json!({"something_else": "great"}).to_string()),
        (Some(FORM), "review_text=%20%20".to_string()),
        (Some(FORM), String::new()),
        (Some("text/plain"), "I love this movie".to_string()),
        (None, "I love this movie".to_string()),
    ];
    for (content_type, body) in cases {
        let res = send(app(), post("/predict", content_type, body.clone())).await;
        assert_eq!(
            res.status,
            StatusCode::BAD_REQUEST,
            "content type {content_type:?}, body {body:?}"
        );
        assert_eq!(res.json(), json!({"error": "Please provide a valid review."}));
    }
}

#[tokio::test]
async fn predict_malformed_payloads_are_500() {
    let cases = [
        "{not json",
        "",
        "[\"I love this movie\"]",
        "null",
        r#"{"review_text": null}"#,
        r#"{"review_text": 5}"#,
        r#"{"review_text": ["great"]}"#,
    ];
    for body in cases {
        let res = send(app(), post("/predict", Some(JSON), body)).await;
        assert_eq!(
            res.status,
            StatusCode::INTERNAL_SERVER_ERROR,
            "body {body:?}"
        );
        let error = res.json()["error"].as_str().unwrap_or_default().to_string();
        assert!(!error.is_empty(), "body {body:?}");
    }
}

#[tokio::test]
async fn predict_redacts_internal_errors_when_configured() {
    let config = ServerConfig {
        redact_internal_errors: true,
        ..test_config()
    };
    let res = send(
        app_with(config.clone()),
        post("/predict", Some(JSON), r#"{"review_text": null}"#),
    )
    .await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.json(), json!({"error": "Internal server error"}));

    // Client errors keep their message.
    let res = send(
        app_with(config),
        post("/predict", Some(JSON), r#"{"review_text": " "}"#),
    )
    .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json(), json!({"error": "Please provide a valid review."}));
}

#[tokio::test]
async fn predict_rejects_oversized_body() {
    let config = ServerConfig {
        max_body_size_mb: 1,
        ..test_config()
    };
    let review = "good ".repeat(400 * 1024);
    let body = json!({ "review_text": review }).to_string();
    let res = send(
        app_with(config.clone()),
        post("/predict", Some(JSON), body),
    )
    .await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    let error = res.json()["error"].as_str().unwrap_or_default().to_string();
    assert!(!error.is_empty());

    let res = send(
        app_with(config),
        post("/predict", Some(FORM), oversized_form(2 * 1024 * 1024)),
    )
    .await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(res.json()["error"].is_string());
}

// ── Operational endpoints ───────────────────────────────────────────────

#[tokio::test]
async fn health_is_ok() {
    let res = send(app(), get("/health")).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["status"], "healthy");
}

#[tokio::test]
async fn ready_reports_artifacts() {
    let res = send(app(), get("/ready")).await;
    assert_eq!(res.status, StatusCode::OK);
    let body = res.json();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["model"]["n_features"], 18);
    assert_eq!(body["model"]["classes"], json!([0, 1]));

    let artifacts = body["model"]["artifacts"].as_array().unwrap();
    assert_eq!(artifacts.len(), 2);
    assert_eq!(artifacts[0]["kind"], "classifier");
    assert_eq!(artifacts[1]["kind"], "vectorizer");
    for artifact in artifacts {
        assert_eq!(artifact["sha256"].as_str().unwrap().len(), 64);
    }
}

#[tokio::test]
async fn metrics_disabled_is_404() {
    let res = send(app(), get("/metrics")).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.json(), json!({"error": "Metrics endpoint disabled"}));
}

#[tokio::test]
async fn metrics_renders_prometheus_text() {
    let handle = PrometheusBuilder::new().build_recorder().handle();
    let state = ServerState::new(test_config())
        .expect("fixture artifacts load")
        .with_metrics(handle);
    let res = send(build_router(Arc::new(state)), get("/metrics")).await;
    assert_eq!(res.status, StatusCode::OK);
    let content_type = res.headers[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/plain"));
}

#[tokio::test]
async fn unknown_route_is_json_404() {
    let res = send(app(), get("/does-not-exist")).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.json(), json!({"error": "Not found"}));
}

#[tokio::test]
async fn request_id_is_echoed_or_generated() {
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "req-42")
        .body(Body::empty())
        .unwrap();
    let res = send(app(), request).await;
    assert_eq!(res.headers["x-request-id"], "req-42");

    let res = send(app(), get("/health")).await;
    let generated = res.headers["x-request-id"].to_str().unwrap();
    assert_eq!(generated.len(), 36);
}

// ── Startup ─────────────────────────────────────────────────────────────

#[test]
fn state_requires_both_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::copy(
        fixtures_dir().join(DEFAULT_MODEL_PATH),
        dir.path().join(DEFAULT_MODEL_PATH),
    )
    .unwrap();

    let config = ServerConfig {
        model_path: dir.path().join(DEFAULT_MODEL_PATH),
        vectorizer_path: dir.path().join(DEFAULT_VECTORIZER_PATH),
        ..Default::default()
    };
    let err = ServerState::new(config).err().expect("missing vectorizer");
    assert!(matches!(
        err,
        ServerError::Model(ModelError::ArtifactNotFound(_))
    ));
}
