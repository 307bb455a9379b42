use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A time-tracker entry.
///
/// The tracker reports a negative `duration` (conventionally `-1`) for the
/// entry that is currently running.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeEntry {
    #[serde(default)]
    pub id: i64,
    #[serde(default, alias = "wid")]
    pub workspace_id: i64,
    #[serde(default, alias = "pid")]
    pub project_id: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    pub start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub stop: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration: i64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub billable: bool,
}

impl TimeEntry {
    /// Sentinel duration for a running entry.
    pub const RUNNING: i64 = -1;

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.duration < 0
    }
}
