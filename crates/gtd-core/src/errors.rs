//! Cross-cutting error types.
//!
//! Remote transport errors live in `gtd-clients`, store errors in `gtd-reply`.
//! Only errors that any layer can raise without touching the network are
//! defined here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// No project with the given name exists in the fetched snapshot.
    #[error("project not found: {name}")]
    ProjectNotFound { name: String },

    /// Data failed validation (format, constraints).
    #[error("validation error: {0}")]
    Validation(String),
}
