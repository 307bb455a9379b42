use gtd_clients::{RemoteError, SendError};
use gtd_core::CoreError;

/// Error type for the triage pipelines.
#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Send(#[from] SendError),

    #[error(transparent)]
    Core(#[from] CoreError),
}
