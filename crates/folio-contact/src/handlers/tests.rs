use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::error::ContactError;
use crate::model::{ContactMessage, ContactRequest};
use crate::store::{ContactStore, MemoryStore};
use crate::{router, AppState};

/// A store whose every call fails.
struct BrokenStore;

#[async_trait]
impl ContactStore for BrokenStore {
    async fn create(&self, _request: ContactRequest) -> Result<ContactMessage, ContactError> {
        Err(ContactError::Storage("unavailable".into()))
    }

    async fn list(&self) -> Result<Vec<ContactMessage>, ContactError> {
        Err(ContactError::Storage("unavailable".into()))
    }
}

fn app_with(store: Arc<dyn ContactStore>) -> Router {
    router(AppState::new(store))
}

fn post(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get() -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri("/api/contact")
        .body(Body::empty())
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn valid() -> String {
    json!({
        "name": "Ada Lovelace",
        "email": "ada@example.com",
        "message": "I would like to talk about engines."
    })
    .to_string()
}

#[tokio::test]
async fn valid_message_is_created() {
    let app = app_with(Arc::new(MemoryStore::new()));
    let response = app.oneshot(post(&valid())).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Message received successfully");
    assert!(body["id"].as_str().is_some_and(|id| !id.is_empty()));
}

#[tokio::test]
async fn invalid_message_lists_field_errors() {
    let app = app_with(Arc::new(MemoryStore::new()));
    let bad = json!({"name": "A", "email": "not-an-email", "message": "hi"}).to_string();
    let response = app.oneshot(post(&bad)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Validation failed");
    let fields: Vec<_> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(fields, ["name", "email", "message"]);
}

#[tokio::test]
async fn malformed_json_is_a_validation_failure() {
    let app = app_with(Arc::new(MemoryStore::new()));
    let response = app.oneshot(post("{not json")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Validation failed");
    assert_eq!(body["details"][0]["field"], "body");
}

#[tokio::test]
async fn rejected_messages_are_not_stored() {
    let store = Arc::new(MemoryStore::new());
    let app = app_with(store.clone());
    let bad = json!({"name": "Ada"}).to_string();
    app.oneshot(post(&bad)).await.unwrap();

    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn list_returns_created_messages_in_order() {
    let store = Arc::new(MemoryStore::new());
    let app = app_with(store);

    app.clone().oneshot(post(&valid())).await.unwrap();
    let second = json!({
        "name": "Grace",
        "email": "grace@example.com",
        "message": "Compilers are my thing."
    })
    .to_string();
    app.clone().oneshot(post(&second)).await.unwrap();

    let response = app.oneshot(get()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["name"], "Ada Lovelace");
    assert_eq!(list[1]["name"], "Grace");
    assert!(list[0]["created_at"].is_string());
}

#[tokio::test]
async fn storage_failure_on_create_is_500() {
    let app = app_with(Arc::new(BrokenStore));
    let response = app.oneshot(post(&valid())).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body, json!({"success": false, "error": "Failed to process message"}));
}

#[tokio::test]
async fn storage_failure_on_list_is_500() {
    let app = app_with(Arc::new(BrokenStore));
    let response = app.oneshot(get()).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body, json!({"success": false, "error": "Failed to fetch messages"}));
}
