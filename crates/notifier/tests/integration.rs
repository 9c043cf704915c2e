//! Integration tests for Telegram delivery against a local fake Bot API.

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};

use herald_notifier::telegram::TelegramNotifier;
use herald_notifier::{Notifier, deliver};

#[derive(Clone, Default)]
struct FakeBotApi {
    received: Arc<Mutex<Vec<(String, Value)>>>,
    status: Arc<Mutex<Option<StatusCode>>>,
}

async fn send_message(
    State(api): State<FakeBotApi>,
    Path(bot): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    api.received.lock().unwrap().push((bot, body));
    match *api.status.lock().unwrap() {
        Some(status) => (status, Json(json!({"ok": false, "description": "Bad Request: chat not found"}))),
        None => (StatusCode::OK, Json(json!({"ok": true}))),
    }
}

/// Serve the fake Bot API on an ephemeral port and return its base URL.
async fn spawn_bot_api(api: FakeBotApi) -> String {
    let app = Router::new()
        .route("/{bot}/sendMessage", post(send_message))
        .with_state(api);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_send_posts_chat_id_and_text() {
    let api = FakeBotApi::default();
    let base = spawn_bot_api(api.clone()).await;
    let notifier = TelegramNotifier::new(base, "secret".to_string(), "777".to_string());

    notifier.send("Работа взята на проверку ревьюером.").await.unwrap();

    let received = api.received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].0, "botsecret");
    assert_eq!(received[0].1["chat_id"], "777");
    assert_eq!(received[0].1["text"], "Работа взята на проверку ревьюером.");
    assert!(received[0].1.get("parse_mode").is_none());
}

#[tokio::test]
async fn test_rejected_message_is_delivery_error() {
    let api = FakeBotApi::default();
    *api.status.lock().unwrap() = Some(StatusCode::BAD_REQUEST);
    let base = spawn_bot_api(api.clone()).await;
    let notifier = TelegramNotifier::new(base, "secret".to_string(), "777".to_string());

    let err = notifier.send("hello").await.unwrap_err();
    assert!(err.to_string().contains("400"), "{err}");
    assert!(err.to_string().contains("chat not found"), "{err}");

    // deliver() absorbs the same failure
    assert!(!deliver(&notifier, "hello").await);
}

#[tokio::test]
async fn test_unreachable_api_does_not_propagate() {
    // Bind then drop to get a port nobody listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let notifier = TelegramNotifier::new(
        format!("http://{}", addr),
        "secret".to_string(),
        "777".to_string(),
    );

    let err = notifier.send("hello").await.unwrap_err();
    assert!(!err.to_string().contains("secret"), "token leaked: {err}");
    assert!(!deliver(&notifier, "hello").await);
}
