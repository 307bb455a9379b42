//! Prompt-and-wait settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_prompt() -> String {
    "no running Toggl entry. please fill in:".to_string()
}

const fn default_timeout_secs() -> u64 {
    60
}

const fn default_poll_interval_ms() -> u64 {
    1000
}

const fn default_long_poll_secs() -> u64 {
    120
}

fn default_offset_path() -> PathBuf {
    dirs::data_dir()
        .map_or_else(|| PathBuf::from(".gtd"), |dir| dir.join("gtd"))
        .join("telegram-offset")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReplyConfig {
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// Overall wait window for a reply.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Server-side hold time of one long poll.
    #[serde(default = "default_long_poll_secs")]
    pub long_poll_secs: u64,

    /// File holding the durable update offset.
    #[serde(default = "default_offset_path")]
    pub offset_path: PathBuf,
}

impl Default for ReplyConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            timeout_secs: default_timeout_secs(),
            poll_interval_ms: default_poll_interval_ms(),
            long_poll_secs: default_long_poll_secs(),
            offset_path: default_offset_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_file_has_a_stable_name() {
        let config = ReplyConfig::default();
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.poll_interval_ms, 1000);
        assert!(config.offset_path.ends_with("telegram-offset"));
    }
}
