//! Telegram Bot API client: the messaging channel.
//!
//! The Bot API signals failures inside the JSON body (`ok`, `error_code`,
//! `description`), so a 200 response is not proof of delivery.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{RemoteError, SendError};
use crate::http::{DEFAULT_TIMEOUT, build_client, check_response, decode_json};

pub const DEFAULT_BASE_URL: &str = "https://api.telegram.org";

/// Characters reserved by MarkdownV2 in plain text.
pub const MARKDOWN_V2_RESERVED: &[char] = &[
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
];

/// Extra time allowed on top of the server-side long-poll hold.
const LONG_POLL_SLACK: Duration = Duration::from_secs(10);

/// Text formatting mode of an outgoing message.
///
/// With a mode set, the text must already be written in that mode: literal
/// text passed through [`escape_markdown`], link targets through
/// [`escape_link_url`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseMode {
    MarkdownV2,
}

impl ParseMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MarkdownV2 => "MarkdownV2",
        }
    }
}

/// Escape literal text for MarkdownV2.
#[must_use]
pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '\\' || MARKDOWN_V2_RESERVED.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Escape the target of an inline link, where only `)` and `\` are special.
#[must_use]
pub fn escape_link_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for c in url.chars() {
        if matches!(c, ')' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// One entry of a `getUpdates` result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub message_id: i64,
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
    /// Unix seconds.
    pub date: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
}

impl Update {
    /// Build a text-message update. Mostly useful for fakes and tests.
    #[must_use]
    pub fn text(update_id: i64, chat_id: i64, date: i64, text: impl Into<String>) -> Self {
        Self {
            update_id,
            message: Some(Message {
                message_id: update_id,
                chat: Chat { id: chat_id },
                text: Some(text.into()),
                date,
            }),
        }
    }
}

/// Envelope of every Bot API response.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    #[serde(default)]
    result: Option<T>,
    #[serde(default)]
    error_code: i64,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: i64,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parse_mode: Option<&'static str>,
}

/// Outgoing messages and the long-poll update stream.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Send `text` to `chat_id`, formatted according to `mode`.
    async fn send(&self, chat_id: i64, text: &str, mode: Option<ParseMode>)
    -> Result<(), SendError>;

    /// Fetch updates with `update_id >= offset`, letting the server hold the
    /// request open for up to `wait`.
    async fn get_updates(&self, offset: i64, wait: Duration) -> Result<Vec<Update>, RemoteError>;
}

/// HTTP-backed [`Messenger`] for the Telegram Bot API.
pub struct TelegramClient {
    http: reqwest::Client,
    api_token: String,
    base_url: String,
}

impl TelegramClient {
    /// # Errors
    ///
    /// Returns [`RemoteError::Http`] if the underlying HTTP client cannot be
    /// built.
    pub fn new(api_token: impl Into<String>) -> Result<Self, RemoteError> {
        Ok(Self {
            http: build_client(DEFAULT_TIMEOUT)?,
            api_token: api_token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{method}", self.base_url, self.api_token)
    }
}

/// Interpret a `sendMessage` reply.
///
/// The body decides first: a decodable envelope with `ok=false` or a non-zero
/// `error_code` is a rejection regardless of the HTTP status.
fn interpret_send_response(status: u16, body: &str) -> Result<(), SendError> {
    match serde_json::from_str::<ApiResponse<serde_json::Value>>(body) {
        Ok(envelope) if envelope.ok && envelope.error_code == 0 => Ok(()),
        Ok(envelope) => Err(SendError::Rejected {
            code: envelope.error_code,
            description: envelope.description,
        }),
        Err(_) if !(200..300).contains(&status) => Err(RemoteError::Status {
            status,
            body: body.to_string(),
        }
        .into()),
        Err(e) => Err(RemoteError::Malformed(format!("{e}: {body}")).into()),
    }
}

#[async_trait]
impl Messenger for TelegramClient {
    async fn send(
        &self,
        chat_id: i64,
        text: &str,
        mode: Option<ParseMode>,
    ) -> Result<(), SendError> {
        let request = SendMessageRequest {
            chat_id,
            text,
            parse_mode: mode.map(ParseMode::as_str),
        };

        let resp = self
            .http
            .post(self.method_url("sendMessage"))
            .json(&request)
            .send()
            .await
            .map_err(RemoteError::from)?;
        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(RemoteError::from)?;

        interpret_send_response(status, &body)?;
        tracing::debug!(chat_id, "sent telegram message");
        Ok(())
    }

    async fn get_updates(&self, offset: i64, wait: Duration) -> Result<Vec<Update>, RemoteError> {
        let url = format!(
            "{}?offset={offset}&allowed_updates=message&timeout={}",
            self.method_url("getUpdates"),
            wait.as_secs()
        );
        let resp = self
            .http
            .get(&url)
            .timeout(wait + LONG_POLL_SLACK)
            .send()
            .await?;
        let envelope: ApiResponse<Vec<Update>> = decode_json(check_response(resp).await?).await?;
        if !envelope.ok {
            return Err(RemoteError::Rejected {
                code: envelope.error_code,
                description: envelope.description,
            });
        }

        let updates = envelope.result.unwrap_or_default();
        tracing::debug!(offset, count = updates.len(), "polled updates");
        Ok(updates)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn escapes_reserved_characters() {
        assert_eq!(
            escape_markdown("next_action in todoist.com"),
            "next\\_action in todoist\\.com"
        );
        assert_eq!(
            escape_markdown("5 - Q1 (draft)! #a+b=c"),
            "5 \\- Q1 \\(draft\\)\\! \\#a\\+b\\=c"
        );
        assert_eq!(escape_markdown(r"a\b"), r"a\\b");
        assert_eq!(escape_markdown("plain text"), "plain text");
    }

    #[test]
    fn link_targets_escape_only_closing_paren_and_backslash() {
        assert_eq!(
            escape_link_url("https://todoist.com/app/search/%23Work_(old)"),
            "https://todoist.com/app/search/%23Work_(old\\)"
        );
    }

    #[test]
    fn send_request_omits_absent_parse_mode() {
        let request = SendMessageRequest {
            chat_id: 42,
            text: "hi",
            parse_mode: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, serde_json::json!({"chat_id": 42, "text": "hi"}));
    }

    #[test]
    fn error_code_inside_200_is_rejected() {
        let body = r#"{"ok": false, "error_code": 400, "description": "Bad Request: chat not found"}"#;
        match interpret_send_response(200, body).unwrap_err() {
            SendError::Rejected { code, description } => {
                assert_eq!(code, 400);
                assert_eq!(description, "Bad Request: chat not found");
            }
            SendError::Remote(other) => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn successful_ack_is_ok() {
        let body = r#"{"ok": true, "result": {"message_id": 7}}"#;
        assert!(interpret_send_response(200, body).is_ok());
    }

    #[test]
    fn undecodable_error_keeps_status() {
        let err = interpret_send_response(502, "<html>bad gateway</html>").unwrap_err();
        assert!(matches!(
            err,
            SendError::Remote(RemoteError::Status { status: 502, .. })
        ));
    }

    #[test]
    fn updates_without_message_decode() {
        let raw = r#"{"ok": true, "result": [
            {"update_id": 10, "message": {"message_id": 10, "chat": {"id": 5}, "text": "hi", "date": 1000}},
            {"update_id": 11}
        ]}"#;
        let envelope: ApiResponse<Vec<Update>> = serde_json::from_str(raw).unwrap();
        let updates = envelope.result.unwrap();
        assert_eq!(updates[0], Update::text(10, 5, 1000, "hi"));
        assert!(updates[1].message.is_none());
    }
}
