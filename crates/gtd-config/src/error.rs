//! Configuration error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    /// A section a command needs lacks its credentials.
    #[error("Configuration section '{section}' is not configured (missing required fields)")]
    NotConfigured { section: String },
}

impl ConfigError {
    pub(crate) fn not_configured(section: &str) -> Self {
        Self::NotConfigured {
            section: section.to_string(),
        }
    }
}
