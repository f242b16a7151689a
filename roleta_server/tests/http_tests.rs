use std::path::PathBuf;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use roleta_core::{EngineParams, SUM_TOLERANCE};
use roleta_server::{build_router, AppState};
use roleta_shared::{HealthResponse, SpinResponse};

fn app() -> Router {
    let static_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../static");
    build_router(AppState::new(EngineParams::standard()), &static_dir)
}

async fn body_bytes(resp: axum::response::Response) -> Vec<u8> {
    to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body")
        .to_vec()
}

#[tokio::test]
async fn spin_returns_consistent_outcome() {
    let params = EngineParams::standard();
    for _ in 0..50 {
        let resp = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/spin")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let spin: SpinResponse = serde_json::from_slice(&body_bytes(resp).await).unwrap();
        let sum: f64 = spin.reels.iter().sum();
        assert!((sum - spin.total_value).abs() <= SUM_TOLERANCE, "{spin:?}");
        assert!(spin.reels.iter().all(|r| params.symbols.contains(*r)));
        let known = params
            .prizes
            .entries()
            .iter()
            .any(|e| e.label == spin.total_label && e.value == spin.total_value);
        assert!(known || spin.total_label == params.fallback.label);
    }
}

#[tokio::test]
async fn spin_ignores_request_body() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/spin")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"bet": 5}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let v: serde_json::Value = serde_json::from_slice(&body_bytes(resp).await).unwrap();
    assert!(v["total_label"].is_string());
    assert!(v["total_value"].is_number());
    assert_eq!(v["reels"].as_array().map(|r| r.len()), Some(3));
}

#[tokio::test]
async fn spin_allows_any_origin() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/spin")
                .header(header::ORIGIN, "https://t.me")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn health_reports_healthy() {
    let resp = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let health: HealthResponse = serde_json::from_slice(&body_bytes(resp).await).unwrap();
    assert_eq!(health.status, "healthy");
}

#[tokio::test]
async fn serves_front_end() {
    let resp = app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let html = String::from_utf8(body_bytes(resp).await).unwrap();
    assert!(html.contains("spinBtn"));

    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/static/script.js")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn spin_rejects_get() {
    let resp = app()
        .oneshot(Request::builder().uri("/spin").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}
