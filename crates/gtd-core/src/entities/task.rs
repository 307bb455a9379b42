use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::remote_time;

const fn default_priority() -> i32 {
    1
}

/// A task as returned by the task service.
///
/// `created_at` is assigned by the remote system and never changes. Moving a
/// task changes `project_id` only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub project_id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub labels: BTreeSet<String>,
    #[serde(with = "remote_time")]
    pub created_at: DateTime<Utc>,
    /// 1 (normal) through 4 (urgent).
    #[serde(default = "default_priority")]
    pub priority: i32,
}

impl Task {
    #[must_use]
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.contains(label)
    }
}
