// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bot API round trips against a mock Telegram server.

use courier_config::model::TelegramConfig;
use courier_core::traits::{Messenger, PluginAdapter};
use courier_core::types::HealthStatus;
use courier_telegram::TelegramMessenger;
use serde_json::json;
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "123456:test-token";

fn messenger(server: &MockServer) -> TelegramMessenger {
    TelegramMessenger::new(&TelegramConfig {
        bot_token: Some(TOKEN.into()),
        chat_id: Some("-100555".into()),
        api_url: Some(server.uri()),
        timeout_secs: 5,
    })
    .unwrap()
}

fn message_ok(id: i32) -> serde_json::Value {
    json!({
        "ok": true,
        "result": {
            "message_id": id,
            "date": 1_700_000_000,
            "chat": {"id": -100555, "type": "private", "first_name": "Ops"},
            "text": "ok"
        }
    })
}

#[tokio::test]
async fn send_text_posts_markdown_to_chat() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(r"(?i)/bot[^/]+/sendmessage$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(message_ok(42)))
        .expect(1)
        .mount(&server)
        .await;

    let receipt = messenger(&server).send_text("hello \\!").await.unwrap();
    assert_eq!(receipt.message_id.as_deref(), Some("42"));

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["chat_id"], json!(-100555));
    assert_eq!(body["text"], "hello \\!");
    assert_eq!(body["parse_mode"], "MarkdownV2");
}

#[tokio::test]
async fn send_photo_uploads_multipart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(r"(?i)/bot[^/]+/sendphoto$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(message_ok(7)))
        .expect(1)
        .mount(&server)
        .await;

    let receipt = messenger(&server)
        .send_photo(vec![0xFF, 0xD8, 0xFF], "caption")
        .await
        .unwrap();
    assert_eq!(receipt.message_id.as_deref(), Some("7"));

    let requests = server.received_requests().await.unwrap();
    let content_type = requests[0]
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("multipart/form-data"), "{content_type}");
}

#[tokio::test]
async fn api_rejection_is_delivery_error_without_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "ok": false,
            "error_code": 400,
            "description": "Bad Request: chat not found"
        })))
        .mount(&server)
        .await;

    let err = messenger(&server).send_text("hi").await.unwrap_err();
    let text = err.to_string();
    assert!(text.contains("chat not found"), "{text}");
    assert!(!text.contains(TOKEN));
}

#[tokio::test]
async fn unreachable_server_error_is_redacted() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let messenger = TelegramMessenger::new(&TelegramConfig {
        bot_token: Some(TOKEN.into()),
        chat_id: Some("1".into()),
        api_url: Some(uri),
        timeout_secs: 2,
    })
    .unwrap();

    let err = messenger.send_text("hi").await.unwrap_err();
    assert!(!err.to_string().contains("test-token"));
}

#[tokio::test]
async fn health_check_uses_get_me() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(r"(?i)/bot[^/]+/getme$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "result": {
                "id": 123456,
                "is_bot": true,
                "first_name": "Courier",
                "username": "courier_bot",
                "can_join_groups": false,
                "can_read_all_group_messages": false,
                "supports_inline_queries": false,
                "can_connect_to_business": false,
                "has_main_web_app": false
            }
        })))
        .mount(&server)
        .await;

    let status = messenger(&server).health_check().await.unwrap();
    assert_eq!(status, HealthStatus::Healthy);
}
