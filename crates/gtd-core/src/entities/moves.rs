use serde::{Deserialize, Serialize};

/// Acknowledgement of a single move command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MoveAck {
    /// The remote accepted the command; `sync_status` is echoed verbatim.
    Applied { sync_status: serde_json::Value },
    /// No request was made.
    DryRun { description: String },
}

/// Per-task result of a relocation run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MoveStatus {
    Moved { ack: MoveAck },
    Failed { error: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MoveOutcome {
    pub task_id: String,
    pub content: String,
    pub destination_project_id: String,
    #[serde(flatten)]
    pub status: MoveStatus,
}

impl MoveOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.status, MoveStatus::Moved { .. })
    }

    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        matches!(
            self.status,
            MoveStatus::Moved {
                ack: MoveAck::DryRun { .. }
            }
        )
    }
}
