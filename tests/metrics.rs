// tests/metrics.rs
// One test only: the Prometheus recorder is process-global and installs once.
use axum::body::{self, Body};
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use text_insight::config::AnalyzerConfig;
use text_insight::metrics::Metrics;
use text_insight::{api, AppState};

#[tokio::test]
async fn metrics_endpoint_counts_requests_and_errors() {
    let metrics = Metrics::init().expect("install recorder");
    let app = api::router(AppState::new(AnalyzerConfig::default())).merge(metrics.router());

    let analyze = Request::post("/api/analyze")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"text":"A perfectly ordinary sentence about nothing."}"#))
        .unwrap();
    let resp = app.clone().oneshot(analyze).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let missing = Request::get("/api/documents/404").body(Body::empty()).unwrap();
    let resp = app.clone().oneshot(missing).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = app
        .clone()
        .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // axum::body::to_bytes requires an explicit limit
    let body = body::to_bytes(resp.into_body(), 1_048_576).await.unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    for needle in ["analyses_total", "api_errors_total"] {
        assert!(text.contains(needle), "missing series {needle} in:\n{text}");
    }
    assert!(text.contains(r#"status="404""#));
}
