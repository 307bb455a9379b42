//! Remote error types.

use thiserror::Error;

/// Errors raised by any REST dependency.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service returned a non-success status code.
    #[error("API error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, verbatim.
        body: String,
    },

    /// The service returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// The payload could not be decoded or lacks a required marker.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// The service answered 200 but reported a structured failure.
    #[error("request rejected ({code}): {description}")]
    Rejected { code: i64, description: String },
}

impl From<serde_json::Error> for RemoteError {
    fn from(error: serde_json::Error) -> Self {
        Self::Malformed(error.to_string())
    }
}

/// Failure to deliver a chat message.
#[derive(Debug, Error)]
pub enum SendError {
    /// The request did not produce a decodable acknowledgement.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// The messaging API acknowledged the request with an error.
    #[error("telegram send error: code={code} description={description}")]
    Rejected { code: i64, description: String },
}
