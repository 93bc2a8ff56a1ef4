//! HTTP tests for the demo page.
//!
//! Requests go straight through the router with `oneshot`; no socket is bound.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use corefview::server::{router, AppState};
use corefview::{CorefParams, Demo, ModelSize, ModelStore};

fn app() -> Router {
    let demo = Demo::new(Arc::new(ModelStore::new()), ModelSize::Medium);
    router(AppState::new(demo, CorefParams::default()))
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn get(uri: &str) -> (StatusCode, String) {
    let response = app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    (status, body_string(response).await)
}

async fn post(form: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("POST")
        .uri("/resolve")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    (status, body_string(response).await)
}

// =============================================================================
// Page
// =============================================================================

#[tokio::test]
async fn test_health() {
    let (status, body) = get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_index_defaults_to_example_mode() {
    let (status, body) = get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<h1>Coreference Resolution Demo</h1>"));
    assert_eq!(body.matches("<option ").count(), 14);
    assert!(body.contains("Select an example paragraph."));
    assert!(body.contains("Type your own paragraph."));
    assert!(body.contains("value='example_paragraph' checked"));
    assert!(!body.contains("id='results'"));
}

#[tokio::test]
async fn test_index_own_mode_shows_textarea() {
    let (status, body) = get("/?mode=own_paragraph").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<textarea"));
    assert!(!body.contains("<select"));
}

// =============================================================================
// Submissions
// =============================================================================

#[tokio::test]
async fn test_submit_example() {
    let (status, body) = post("mode=example_paragraph&example=0&greedyness=0.5&max_dist=50&max_dist_match=500").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<section id='results'>"));
    assert!(body.contains(">YES</span>"));
    assert!(body.contains("<span title='My sister'"));
    assert!(body.contains("My sister has a dog. My sister loves a dog."));
    assert!(body.contains("<option value='0' selected>"));
}

#[tokio::test]
async fn test_submit_own_text_is_echoed() {
    let (status, body) =
        post("mode=own_paragraph&text=Sam+has+a+Parker+pen.+He+loves+writing+with+it.").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(
        "<textarea id='paragraph' name='text'>Sam has a Parker pen. He loves writing with it.</textarea>"
    ));
    assert!(body.contains("Sam has a Parker pen. Sam loves writing with a Parker pen."));
    assert!(body.contains("value='own_paragraph' checked"));
}

#[tokio::test]
async fn test_submit_without_coref() {
    let (status, body) = post("mode=own_paragraph&text=It+rains.").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(">NO</span>"));
    assert!(!body.contains("<span title="));
}

#[tokio::test]
async fn test_slider_out_of_range_is_bad_request() {
    let (status, body) = post("mode=example_paragraph&example=0&greedyness=1.5").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("greedyness"));
}

#[tokio::test]
async fn test_slider_off_step_is_bad_request() {
    let (status, body) = post("mode=example_paragraph&example=0&max_dist=33").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("max_dist"));
}

#[tokio::test]
async fn test_unknown_example_is_bad_request() {
    let (status, _) = post("mode=example_paragraph&example=14").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_slider_is_bad_request() {
    let (status, body) = post("mode=example_paragraph&example=0&greedyness=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.starts_with("Invalid input:"));
}

#[tokio::test]
async fn test_malformed_example_index_is_bad_request() {
    let (status, _) = post("mode=example_paragraph&example=first").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
