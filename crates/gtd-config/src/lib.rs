//! # gtd-config
//!
//! Layered configuration loading for the `gtd` toolkit using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`GTD_*` prefix, `__` as separator)
//! 2. Project-level `.gtd/config.toml`
//! 3. User-level `~/.config/gtd/config.toml`
//! 4. Built-in defaults
//!
//! Figment maps `GTD_TODOIST__API_TOKEN` -> `todoist.api_token`,
//! `GTD_TELEGRAM__USER_ID` -> `telegram.user_id`, and so on.
//!
//! Only the binary reads configuration. The library crates take plain values.

mod error;
mod reply;
mod telegram;
mod todoist;
mod toggl;
mod triage;

pub use error::ConfigError;
pub use reply::ReplyConfig;
pub use telegram::TelegramConfig;
pub use todoist::TodoistConfig;
pub use toggl::TogglConfig;
pub use triage::{ArchiveConfig, TriageConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GtdConfig {
    #[serde(default)]
    pub todoist: TodoistConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub toggl: TogglConfig,
    #[serde(default)]
    pub triage: TriageConfig,
    #[serde(default)]
    pub archive: ArchiveConfig,
    #[serde(default)]
    pub reply: ReplyConfig,
}

impl GtdConfig {
    /// Load configuration from TOML files and environment variables.
    ///
    /// Does not read `.env`; see [`Self::load_with_dotenv`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source cannot be parsed or a
    /// value has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load `.env` from the working directory, then [`Self::load`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".gtd/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("GTD_").split("__"))
    }

    /// Path to the user-global config file.
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("gtd").join("config.toml"))
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] without an API token.
    pub fn require_todoist(&self) -> Result<&TodoistConfig, ConfigError> {
        if self.todoist.is_configured() {
            Ok(&self.todoist)
        } else {
            Err(ConfigError::not_configured("todoist"))
        }
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] without a bot token and user id.
    pub fn require_telegram(&self) -> Result<&TelegramConfig, ConfigError> {
        if self.telegram.is_configured() {
            Ok(&self.telegram)
        } else {
            Err(ConfigError::not_configured("telegram"))
        }
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] without an API token and
    /// workspace id.
    pub fn require_toggl(&self) -> Result<&TogglConfig, ConfigError> {
        if self.toggl.is_configured() {
            Ok(&self.toggl)
        } else {
            Err(ConfigError::not_configured("toggl"))
        }
    }
}
