//! Tests for the dispatch strategies and `HttpDispatcher` against a local server.

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use chrono::{TimeZone, Utc};
use serde_json::{Value, json};

use super::call_template::CallTemplate;
use super::dispatch::{DispatchError, HttpDispatcher, NodeDispatcher, NodeStrategy, entry_payload};
use crate::types::FlowNode;

async fn serve(app: Router) -> String {
  let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  tokio::spawn(async move {
    axum::serve(listener, app).await.unwrap();
  });
  format!("http://{addr}")
}

fn app() -> Router {
  Router::new()
    .route("/health", get(|| async { axum::Json(json!({"status": "ok"})) }))
    .route(
      "/api/execute",
      post(|axum::Json(body): axum::Json<Value>| async move {
        axum::Json(json!({ "received": body }))
      }),
    )
    .route("/api/status", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
    .route("/api/process", post(|| async { "not json" }))
}

fn node(id: &str) -> FlowNode {
  FlowNode::new(id, "")
}

#[test]
fn strategy_for_position() {
  assert_eq!(NodeStrategy::for_position(0), NodeStrategy::Entry);
  assert_eq!(
    NodeStrategy::for_position(3),
    NodeStrategy::External { position: 3 }
  );
}

#[test]
fn entry_payload_is_initialized() {
  let now = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
  let p = entry_payload(now);
  assert_eq!(p["status"], "initialized");
  assert_eq!(p["timestamp"], "2026-01-02T03:04:05+00:00");
}

#[tokio::test]
async fn get_template_decodes_json_body() {
  let base = serve(app()).await;
  let d = HttpDispatcher::new(base, crate::queue::default_templates());
  let out = d.dispatch(&node("node-1"), 1).await.unwrap();
  assert_eq!(out, json!({"status": "ok"}));
}

#[tokio::test]
async fn post_template_sends_script_body() {
  let base = serve(app()).await;
  let d = HttpDispatcher::new(format!("{base}/"), crate::queue::default_templates());
  let out = d.dispatch(&node("node-2"), 2).await.unwrap();
  assert_eq!(out, json!({"received": {"script": "return input;"}}));
}

#[tokio::test]
async fn non_success_status_is_an_error() {
  let base = serve(app()).await;
  let d = HttpDispatcher::new(base, crate::queue::default_templates());
  let err = d.dispatch(&node("node-3"), 3).await.unwrap_err();
  assert!(matches!(err, DispatchError::Status(500)));
  assert_eq!(err.to_string(), "HTTP error! status: 500");
}

#[tokio::test]
async fn non_json_body_is_a_decode_error() {
  let base = serve(app()).await;
  let d = HttpDispatcher::new(base, crate::queue::default_templates());
  let err = d.dispatch(&node("node-4"), 4).await.unwrap_err();
  assert!(matches!(err, DispatchError::Decode(_)));
}

#[tokio::test]
async fn templates_wrap_by_position() {
  let base = serve(app()).await;
  let d = HttpDispatcher::new(base, crate::queue::default_templates());
  assert_eq!(d.template_for(5).map(|t| t.path.as_str()), Some("/health"));
  let out = d.dispatch(&node("node-5"), 5).await.unwrap();
  assert_eq!(out["status"], "ok");
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
  let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  drop(listener);
  let d = HttpDispatcher::new(format!("http://{addr}"), vec![CallTemplate::get("h", "/health")]);
  let err = d.dispatch(&node("node-1"), 1).await.unwrap_err();
  assert!(matches!(err, DispatchError::Transport(_)));
}

#[tokio::test]
async fn no_templates_is_an_error() {
  let d = HttpDispatcher::new("http://127.0.0.1:1", vec![]);
  let err = d.dispatch(&node("node-1"), 1).await.unwrap_err();
  assert!(matches!(err, DispatchError::NoTemplate(1)));
}
