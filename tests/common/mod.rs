//! Test helpers for HTTP API tests.

#![allow(dead_code)]

use axum_test::TestServer;
use serde_json::{json, Value};
use std::sync::Arc;

use msgboard::web::handlers::AppState;
use msgboard::web::router::create_app;
use msgboard::Database;

/// Create a test server with an in-memory database.
pub async fn create_test_server() -> (TestServer, Arc<Database>) {
    let db = Arc::new(
        Database::open_in_memory()
            .await
            .expect("Failed to create test database"),
    );

    let app_state = Arc::new(AppState::new(db.clone()));
    let router = create_app(app_state, &[]);

    let server = TestServer::new(router).expect("Failed to create test server");

    (server, db)
}

/// Create a thread on `board` and return the response body.
pub async fn create_thread(server: &TestServer, board: &str, text: &str, password: &str) -> Value {
    let response = server
        .post(&format!("/api/threads/{}", board))
        .json(&json!({
            "text": text,
            "delete_password": password
        }))
        .await;

    response.assert_status_ok();
    response.json::<Value>()
}

/// Reply to a thread and return the response body.
pub async fn create_reply(
    server: &TestServer,
    board: &str,
    thread_id: &str,
    text: &str,
    password: &str,
) -> Value {
    let response = server
        .post(&format!("/api/replies/{}", board))
        .json(&json!({
            "thread_id": thread_id,
            "text": text,
            "delete_password": password
        }))
        .await;

    response.assert_status_ok();
    response.json::<Value>()
}

/// Fetch a thread with every reply.
pub async fn get_thread(server: &TestServer, board: &str, thread_id: &str) -> Value {
    let response = server
        .get(&format!("/api/replies/{}", board))
        .add_query_param("thread_id", thread_id)
        .await;

    response.assert_status_ok();
    response.json::<Value>()
}

/// Assert that no moderation-only field appears anywhere in `value`.
pub fn assert_sanitized(value: &Value) {
    match value {
        Value::Object(map) => {
            assert!(
                !map.contains_key("delete_password"),
                "delete_password leaked: {value}"
            );
            assert!(!map.contains_key("reported"), "reported leaked: {value}");
            map.values().for_each(assert_sanitized);
        }
        Value::Array(items) => items.iter().for_each(assert_sanitized),
        _ => {}
    }
}
