//! HTTP contract tests for the Telegram messenger.

use std::time::Duration;

use gtd_clients::{Messenger, ParseMode, RemoteError, SendError, TelegramClient};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> TelegramClient {
    TelegramClient::new("123:abc")
        .unwrap()
        .with_base_url(server.uri())
}

#[tokio::test]
async fn markdown_text_is_sent_as_composed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendMessage"))
        .and(body_json(json!({
            "chat_id": 42,
            "text": "5 \\- [Work](https://todoist.com/app/search/%23Work)",
            "parse_mode": "MarkdownV2"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true, "result": {}})))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .send(
            42,
            "5 \\- [Work](https://todoist.com/app/search/%23Work)",
            Some(ParseMode::MarkdownV2),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn send_without_mode_leaves_text_alone() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendMessage"))
        .and(body_json(json!({"chat_id": 42, "text": "Ok. Recorded: 'a_b.c'"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true, "result": {}})))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .send(42, "Ok. Recorded: 'a_b.c'", None)
        .await
        .unwrap();
}

#[tokio::test]
async fn error_code_inside_200_is_send_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendMessage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": false,
            "error_code": 400,
            "description": "Bad Request: can't parse entities"
        })))
        .mount(&server)
        .await;

    let err = client(&server).send(42, "x", None).await.unwrap_err();
    match err {
        SendError::Rejected { code, description } => {
            assert_eq!(code, 400);
            assert_eq!(description, "Bad Request: can't parse entities");
        }
        SendError::Remote(other) => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn get_updates_passes_offset_and_long_poll_hold() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bot123:abc/getUpdates"))
        .and(query_param("offset", "17"))
        .and(query_param("allowed_updates", "message"))
        .and(query_param("timeout", "120"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "result": [
                {"update_id": 17, "message": {"message_id": 3, "chat": {"id": 42}, "text": "Writing", "date": 1700000000}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let updates = client(&server)
        .get_updates(17, Duration::from_secs(120))
        .await
        .unwrap();
    assert_eq!(updates.len(), 1);
    let message = updates[0].message.as_ref().unwrap();
    assert_eq!(message.text.as_deref(), Some("Writing"));
    assert_eq!(message.chat.id, 42);
}

#[tokio::test]
async fn get_updates_not_ok_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bot123:abc/getUpdates"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": false,
            "error_code": 409,
            "description": "Conflict: terminated by other getUpdates request"
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .get_updates(0, Duration::from_secs(1))
        .await
        .unwrap_err();
    assert!(matches!(err, RemoteError::Rejected { code: 409, .. }));
}
