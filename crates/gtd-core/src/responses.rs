//! Report types returned by the scheduled pipelines and printed by `gtd`.

use serde::{Deserialize, Serialize};

use crate::entities::{Empty, MoveOutcome, OverLimit, Task};

/// Result of the project report pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectReport {
    pub too_many: Vec<OverLimit>,
    pub zero: Vec<Empty>,
    /// Whether the digest was delivered to the chat.
    pub sent: bool,
}

/// Result of the archive pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArchiveReport {
    pub source_project_id: String,
    pub destination_project_id: String,
    pub candidates: Vec<Task>,
    pub outcomes: Vec<MoveOutcome>,
}

impl ArchiveReport {
    #[must_use]
    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_success()).count()
    }
}

/// Why the running-entry pipeline finished the way it did.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum EntryReason {
    /// An entry was already running; nothing was asked.
    Running,
    /// The user replied and a new entry was started.
    UserStarted,
    /// The user did not reply within the wait window.
    Timeout,
    /// Only a notification was sent.
    Notified,
}

/// Result of the running-entry pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntryReport {
    pub reason: EntryReason,
    #[serde(default)]
    pub time_entry: String,
}
