//! Toggl Track v9 client: the time tracker.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gtd_core::entities::TimeEntry;
use serde::Serialize;

use crate::error::RemoteError;
use crate::http::{DEFAULT_TIMEOUT, build_client, check_response};

pub const DEFAULT_BASE_URL: &str = "https://api.track.toggl.com/api/v9";

/// Client identifier stamped on every entry this toolkit creates.
pub const CREATED_WITH: &str = "gtd-scripts";

/// Toggl's literal basic-auth password when authenticating by API token.
const TOKEN_PASSWORD: &str = "api_token";

/// Read the running entry, start a new one.
#[async_trait]
pub trait TimeTracker: Send + Sync {
    /// The currently running entry, or `None` when nothing is running.
    async fn current_entry(&self) -> Result<Option<TimeEntry>, RemoteError>;

    /// Start a running entry described by `description`.
    async fn start_entry(&self, description: &str, workspace_id: i64) -> Result<(), RemoteError>;
}

/// Body of `POST /workspaces/{id}/time_entries`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTimeEntry {
    pub description: String,
    pub created_with: &'static str,
    pub duration: i64,
    pub start: String,
    pub workspace_id: i64,
}

impl NewTimeEntry {
    /// A running entry starting at `now`, second precision, UTC.
    #[must_use]
    pub fn running(description: &str, workspace_id: i64, now: DateTime<Utc>) -> Self {
        Self {
            description: description.to_string(),
            created_with: CREATED_WITH,
            duration: TimeEntry::RUNNING,
            start: now.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            workspace_id,
        }
    }
}

/// Decode the `current` endpoint body.
///
/// The tracker answers `null` (or nothing) when no entry runs, and an id of
/// zero means the same.
fn parse_current_entry(body: &str) -> Result<Option<TimeEntry>, RemoteError> {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(None);
    }
    let entry: TimeEntry = serde_json::from_str(trimmed)?;
    Ok((entry.id != 0).then_some(entry))
}

/// HTTP-backed [`TimeTracker`] for Toggl Track.
pub struct TogglClient {
    http: reqwest::Client,
    api_token: String,
    base_url: String,
}

impl TogglClient {
    /// # Errors
    ///
    /// Returns [`RemoteError::Http`] if the underlying HTTP client cannot be
    /// built.
    pub fn new(api_token: impl Into<String>) -> Result<Self, RemoteError> {
        Ok(Self {
            http: build_client(DEFAULT_TIMEOUT)?,
            api_token: api_token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl TimeTracker for TogglClient {
    async fn current_entry(&self) -> Result<Option<TimeEntry>, RemoteError> {
        let resp = self
            .http
            .get(format!("{}/me/time_entries/current", self.base_url))
            .basic_auth(&self.api_token, Some(TOKEN_PASSWORD))
            .send()
            .await?;
        let body = check_response(resp).await?.text().await?;
        let entry = parse_current_entry(&body)?;
        tracing::debug!(running = entry.is_some(), "fetched current time entry");
        Ok(entry)
    }

    async fn start_entry(&self, description: &str, workspace_id: i64) -> Result<(), RemoteError> {
        let entry = NewTimeEntry::running(description, workspace_id, Utc::now());
        let resp = self
            .http
            .post(format!(
                "{}/workspaces/{workspace_id}/time_entries",
                self.base_url
            ))
            .basic_auth(&self.api_token, Some(TOKEN_PASSWORD))
            .json(&entry)
            .send()
            .await?;

        if resp.status() != reqwest::StatusCode::OK {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status, %body, "time entry creation failed");
            return Err(RemoteError::Status { status, body });
        }

        tracing::info!(workspace_id, description, "started time entry");
        Ok(())
    }
}
