use std::path::PathBuf;

use gtd_clients::{RemoteError, SendError};

/// Error type for offset store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No value has been stored yet.
    #[error("offset not set")]
    Miss,

    #[error("offset store I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("offset file {path} holds {content:?}, not an integer")]
    Corrupt { path: PathBuf, content: String },

    /// The lock file stayed held past the wait window.
    #[error("offset store {path} is locked ({holder})")]
    Locked { path: PathBuf, holder: String },
}

/// Error type for the reply coordinator and the entry job.
#[derive(Debug, thiserror::Error)]
pub enum ReplyError {
    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Send(#[from] SendError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// The poll task panicked or was aborted.
    #[error("poll task aborted: {0}")]
    Aborted(String),
}
