// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for the gateway: webhook ingress, inbox API, and
//! presigning, over a real SQLite store and a recording notifier.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use tokio::sync::Mutex;
use tower::ServiceExt;

use atelier_config::model::MediaConfig;
use atelier_core::{AtelierError, LeadStore, Notifier};
use atelier_gateway::{build_router, AppState};
use atelier_media::BucketPresigner;
use atelier_storage::Database;

struct RecordingNotifier {
    sent: Mutex<Vec<(i64, String)>>,
}

impl RecordingNotifier {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
        })
    }

    async fn texts(&self) -> Vec<String> {
        self.sent.lock().await.iter().map(|(_, t)| t.clone()).collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<(), AtelierError> {
        self.sent.lock().await.push((chat_id, text.to_string()));
        Ok(())
    }
}

struct TestHarness {
    router: Router,
    notifier: Arc<RecordingNotifier>,
    store: Arc<Database>,
    _dir: tempfile::TempDir,
}

async fn setup(webhook_secret: Option<&str>, presigner: Option<BucketPresigner>) -> TestHarness {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("gateway.db");
    let store = Arc::new(Database::open(db_path.to_str().unwrap()).await.unwrap());
    let notifier = RecordingNotifier::new();

    let state = AppState::new(
        store.clone(),
        notifier.clone(),
        presigner.map(Arc::new),
        webhook_secret.map(String::from),
    );

    TestHarness {
        router: build_router(state),
        notifier,
        store,
        _dir: dir,
    }
}

fn text_update(chat_id: i64, message_id: i64, text: &str) -> serde_json::Value {
    serde_json::json!({
        "update_id": message_id,
        "message": {
            "message_id": message_id,
            "date": 1700000000i64 + message_id,
            "chat": { "id": chat_id, "type": "private", "first_name": "Ivan" },
            "from": { "id": chat_id, "is_bot": false, "first_name": "Ivan", "username": "ivan" },
            "text": text
        }
    })
}

fn webhook_request(secret: Option<&str>, body: &serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/telegram/webhook")
        .header("content-type", "application/json");
    if let Some(secret) = secret {
        builder = builder.header("X-Telegram-Bot-Api-Secret-Token", secret);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn webhook_probe_answers_ok() {
    let h = setup(None, None).await;
    let response = h
        .router
        .clone()
        .oneshot(get_request("/telegram/webhook"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["ok"], true);
}

#[tokio::test]
async fn secret_mismatch_is_rejected_without_side_effects() {
    let h = setup(Some("topsecret"), None).await;

    let update = text_update(42, 1, "привет");
    let response = h
        .router
        .clone()
        .oneshot(webhook_request(Some("wrong"), &update))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = h
        .router
        .clone()
        .oneshot(webhook_request(None, &update))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    assert!(h.store.conversation(42).await.unwrap().is_none());
    assert!(h.notifier.texts().await.is_empty());
}

#[tokio::test]
async fn first_message_creates_conversation_and_opens_script() {
    let h = setup(Some("topsecret"), None).await;

    let response = h
        .router
        .clone()
        .oneshot(webhook_request(Some("topsecret"), &text_update(42, 1, "привет")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let conv = h.store.conversation(42).await.unwrap().unwrap();
    assert_eq!(conv.state.to_string(), "qualify");
    assert_eq!(conv.current_question, Some(0));
    assert_eq!(conv.unread_count, 1);
    assert_eq!(conv.first_name, "Ivan");

    // Greeting from the ingress, question 0 from the state machine.
    let sent = h.notifier.texts().await;
    assert_eq!(sent.len(), 2);
    assert!(sent[0].contains("Здравствуйте"));
    assert_eq!(sent[1], atelier_dialog::script::QUALIFY_QUESTIONS[0]);

    // The raw message is logged with the state it arrived in.
    let log = h.store.messages(42).await.unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].id, "msg-1-42");
    assert_eq!(log[0].state.as_deref(), Some("greeting"));
}

#[tokio::test]
async fn full_qualification_flow_reaches_handover() {
    let h = setup(None, None).await;
    let answers = ["привет", "кухня", "модерн", "300 тысяч", "да", "Москва"];
    for (i, text) in answers.iter().enumerate() {
        h.router
            .clone()
            .oneshot(webhook_request(None, &text_update(42, i as i64 + 1, text)))
            .await
            .unwrap();
    }

    let conv = h.store.conversation(42).await.unwrap().unwrap();
    assert_eq!(conv.state.to_string(), "contact");
    assert_eq!(conv.answers.len(), 5);
    assert_eq!(conv.answers["question_0"], "кухня");
    assert_eq!(conv.answers["question_4"], "Москва");
    assert_eq!(conv.unread_count, 6);

    // Contact message completes both fields and hands over.
    h.router
        .clone()
        .oneshot(webhook_request(
            None,
            &text_update(42, 7, "89161234567 Иван Петров"),
        ))
        .await
        .unwrap();

    let conv = h.store.conversation(42).await.unwrap().unwrap();
    assert_eq!(conv.state.to_string(), "handover");
    assert_eq!(conv.phone.as_deref(), Some("89161234567"));
    assert_eq!(conv.name.as_deref(), Some("Иван Петров"));

    // greeting + q0..q4 + contact prompt + handover confirmation
    let sent_before = h.notifier.texts().await.len();
    assert_eq!(sent_before, 8);

    // Terminal: further messages are logged but produce no sends.
    h.router
        .clone()
        .oneshot(webhook_request(None, &text_update(42, 8, "когда позвоните?")))
        .await
        .unwrap();
    assert_eq!(h.notifier.texts().await.len(), sent_before);
    assert_eq!(h.store.messages(42).await.unwrap().len(), 8);
}

#[tokio::test]
async fn contact_share_in_contact_state_completes_handover() {
    let h = setup(None, None).await;
    for (i, text) in ["старт", "кухня", "лофт", "500", "нет", "Казань"]
        .iter()
        .enumerate()
    {
        h.router
            .clone()
            .oneshot(webhook_request(None, &text_update(7, i as i64 + 1, text)))
            .await
            .unwrap();
    }

    let share = serde_json::json!({
        "update_id": 10,
        "message": {
            "message_id": 10,
            "date": 1700000100i64,
            "chat": { "id": 7, "type": "private" },
            "from": { "id": 7, "is_bot": false, "first_name": "Anna" },
            "contact": { "phone_number": "+79160000000", "first_name": "Anna" }
        }
    });
    h.router
        .clone()
        .oneshot(webhook_request(None, &share))
        .await
        .unwrap();

    let conv = h.store.conversation(7).await.unwrap().unwrap();
    assert_eq!(conv.state.to_string(), "handover");
    assert_eq!(conv.phone.as_deref(), Some("+79160000000"));
    assert_eq!(conv.name.as_deref(), Some("Anna"));
}

#[tokio::test]
async fn non_message_update_is_acknowledged_without_records() {
    let h = setup(None, None).await;
    let response = h
        .router
        .clone()
        .oneshot(webhook_request(None, &serde_json::json!({ "update_id": 5 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listed = h
        .router
        .clone()
        .oneshot(get_request("/api/conversations"))
        .await
        .unwrap();
    assert_eq!(body_json(listed).await["conversations"], serde_json::json!([]));
}

#[tokio::test]
async fn inbox_lists_conversations_and_messages() {
    let h = setup(None, None).await;
    h.router
        .clone()
        .oneshot(webhook_request(None, &text_update(1, 1, "первый")))
        .await
        .unwrap();
    h.router
        .clone()
        .oneshot(webhook_request(None, &text_update(2, 2, "второй")))
        .await
        .unwrap();

    let response = h
        .router
        .clone()
        .oneshot(get_request("/api/conversations"))
        .await
        .unwrap();
    let json = body_json(response).await;
    let conversations = json["conversations"].as_array().unwrap();
    assert_eq!(conversations.len(), 2);
    // Newest activity first.
    assert_eq!(conversations[0]["chatId"], 2);
    assert_eq!(conversations[1]["chatId"], 1);
    assert_eq!(conversations[0]["aiState"], "qualify");

    let response = h
        .router
        .clone()
        .oneshot(get_request("/api/conversations/1/messages"))
        .await
        .unwrap();
    let json = body_json(response).await;
    let messages = json["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["text"], "первый");
    assert_eq!(messages[0]["direction"], "incoming");
}

#[tokio::test]
async fn read_endpoint_resets_unread_counter() {
    let h = setup(None, None).await;
    h.router
        .clone()
        .oneshot(webhook_request(None, &text_update(9, 1, "ау")))
        .await
        .unwrap();
    assert_eq!(h.store.conversation(9).await.unwrap().unwrap().unread_count, 1);

    let response = h
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/conversations/9/read",
            &serde_json::json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(h.store.conversation(9).await.unwrap().unwrap().unread_count, 0);
}

#[tokio::test]
async fn operator_reply_forces_active_and_silences_the_bot() {
    let h = setup(None, None).await;
    h.router
        .clone()
        .oneshot(webhook_request(None, &text_update(5, 1, "хочу шкаф")))
        .await
        .unwrap();

    let response = h
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/conversations/5/send",
            &serde_json::json!({ "text": "Добрый день! Подскажу по шкафам." }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"]["direction"], "outgoing");
    assert_eq!(json["message"]["aiState"], "active");

    let conv = h.store.conversation(5).await.unwrap().unwrap();
    assert_eq!(conv.state.to_string(), "active");
    assert_eq!(conv.unread_count, 0);

    // The bot must not answer a lead an operator has taken over.
    let sent_before = h.notifier.texts().await.len();
    h.router
        .clone()
        .oneshot(webhook_request(None, &text_update(5, 2, "спасибо")))
        .await
        .unwrap();
    assert_eq!(h.notifier.texts().await.len(), sent_before);
}

#[tokio::test]
async fn operator_reply_validates_input() {
    let h = setup(None, None).await;

    let response = h
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/conversations/5/send",
            &serde_json::json!({ "text": "   " }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = h
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/conversations/5/send",
            &serde_json::json!({ "text": "привет" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

fn test_presigner() -> BucketPresigner {
    let config = MediaConfig {
        account_id: Some("acct".to_string()),
        access_key_id: Some("AKIA".to_string()),
        secret_access_key: Some("secret".to_string()),
        bucket: Some("portfolio".to_string()),
        public_base_url: Some("https://cdn.example.com".to_string()),
        region: "auto".to_string(),
    };
    BucketPresigner::from_config(&config).unwrap()
}

#[tokio::test]
async fn presign_returns_signed_and_public_urls() {
    let h = setup(None, Some(test_presigner())).await;
    let response = h
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/uploads/presign",
            &serde_json::json!({ "fileName": "kitchen.png", "contentType": "image/png" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    let presigned = json["presignedUrl"].as_str().unwrap();
    assert!(presigned.contains("X-Amz-Signature="));
    assert!(presigned.contains("X-Amz-Expires=900"));
    let key = json["fileName"].as_str().unwrap();
    assert!(key.starts_with("photos/"));
    assert!(key.ends_with(".png"));
    assert_eq!(
        json["publicUrl"].as_str().unwrap(),
        format!("https://cdn.example.com/{key}")
    );
}

#[tokio::test]
async fn presign_rejects_bad_requests() {
    let h = setup(None, Some(test_presigner())).await;

    let response = h
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/uploads/presign",
            &serde_json::json!({ "fileName": "report.pdf", "contentType": "application/pdf" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = h
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/uploads/presign",
            &serde_json::json!({ "contentType": "image/png" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn presign_without_media_config_is_a_server_error() {
    let h = setup(None, None).await;
    let response = h
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/uploads/presign",
            &serde_json::json!({ "fileName": "a.jpg", "contentType": "image/jpeg" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn health_reports_ok() {
    let h = setup(None, None).await;
    let response = h.router.clone().oneshot(get_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
}
