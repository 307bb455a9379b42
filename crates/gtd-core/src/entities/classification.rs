use serde::{Deserialize, Serialize};

/// A project carrying more marker-labeled tasks than allowed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OverLimit {
    pub project_name: String,
    pub task_count: usize,
    pub limit: usize,
    pub search_url: String,
}

/// A project carrying no marker-labeled task at all.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Empty {
    pub project_name: String,
    pub search_url: String,
}

/// Either kind of flagged project, tagged by `kind` when serialized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassificationResult {
    OverLimit(OverLimit),
    Empty(Empty),
}

impl ClassificationResult {
    #[must_use]
    pub fn project_name(&self) -> &str {
        match self {
            Self::OverLimit(entry) => &entry.project_name,
            Self::Empty(entry) => &entry.project_name,
        }
    }
}

impl From<OverLimit> for ClassificationResult {
    fn from(value: OverLimit) -> Self {
        Self::OverLimit(value)
    }
}

impl From<Empty> for ClassificationResult {
    fn from(value: Empty) -> Self {
        Self::Empty(value)
    }
}
