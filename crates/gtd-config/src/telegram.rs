//! Telegram bot credentials.

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "https://api.telegram.org".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelegramConfig {
    /// Bot token from `@BotFather`.
    #[serde(default)]
    pub api_token: String,

    /// Chat the bot talks to; for a private chat this is the user id.
    #[serde(default)]
    pub user_id: i64,

    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            user_id: 0,
            base_url: default_base_url(),
        }
    }
}

impl TelegramConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.api_token.is_empty() && self.user_id != 0
    }
}
