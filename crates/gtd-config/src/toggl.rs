use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "https://api.track.toggl.com/api/v9".to_string()
}

/// Toggl Track credentials.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TogglConfig {
    #[serde(default)]
    pub api_token: String,

    /// Workspace new entries are created in.
    #[serde(default)]
    pub workspace_id: i64,

    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for TogglConfig {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            workspace_id: 0,
            base_url: default_base_url(),
        }
    }
}

impl TogglConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.api_token.is_empty() && self.workspace_id != 0
    }
}
