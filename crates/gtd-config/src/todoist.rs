//! Todoist credentials and endpoints.

use serde::{Deserialize, Serialize};

fn default_rest_url() -> String {
    "https://api.todoist.com/rest/v2".to_string()
}

fn default_sync_url() -> String {
    "https://api.todoist.com/sync/v9".to_string()
}

fn default_web_url() -> String {
    "https://todoist.com/app".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TodoistConfig {
    /// Personal API token, sent as a bearer credential.
    #[serde(default)]
    pub api_token: String,

    #[serde(default = "default_rest_url")]
    pub rest_url: String,

    #[serde(default = "default_sync_url")]
    pub sync_url: String,

    /// Web front-end the report links point at.
    #[serde(default = "default_web_url")]
    pub web_url: String,
}

impl Default for TodoistConfig {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            rest_url: default_rest_url(),
            sync_url: default_sync_url(),
            web_url: default_web_url(),
        }
    }
}

impl TodoistConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.api_token.is_empty()
    }
}
