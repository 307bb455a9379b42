//! Report and archive thresholds.

use serde::{Deserialize, Serialize};

fn default_marker_label() -> String {
    "next_action".to_string()
}

const fn default_limit() -> usize {
    3
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TriageConfig {
    /// Label marking a task as the next action of its project.
    #[serde(default = "default_marker_label")]
    pub marker_label: String,

    /// Most marked tasks a project may carry before it is reported.
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Projects never reported for having no marked task.
    #[serde(default)]
    pub excluded_projects: Vec<String>,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            marker_label: default_marker_label(),
            limit: default_limit(),
            excluded_projects: Vec::new(),
        }
    }
}

fn default_source_project() -> String {
    "Inbox".to_string()
}

fn default_destination_project() -> String {
    "inbox_archive".to_string()
}

const fn default_age_threshold_hours() -> i64 {
    72
}

const fn default_priority_ceiling() -> i32 {
    3
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArchiveConfig {
    #[serde(default = "default_source_project")]
    pub source_project: String,

    #[serde(default = "default_destination_project")]
    pub destination_project: String,

    /// Tasks strictly older than this are candidates.
    #[serde(default = "default_age_threshold_hours")]
    pub age_threshold_hours: i64,

    /// Tasks with priority strictly below this are candidates.
    #[serde(default = "default_priority_ceiling")]
    pub priority_ceiling: i32,

    #[serde(default)]
    pub dry_run: bool,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            source_project: default_source_project(),
            destination_project: default_destination_project(),
            age_threshold_hours: default_age_threshold_hours(),
            priority_ceiling: default_priority_ceiling(),
            dry_run: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let triage = TriageConfig::default();
        assert_eq!(triage.marker_label, "next_action");
        assert_eq!(triage.limit, 3);
        assert!(triage.excluded_projects.is_empty());

        let archive = ArchiveConfig::default();
        assert_eq!(archive.source_project, "Inbox");
        assert_eq!(archive.destination_project, "inbox_archive");
        assert_eq!(archive.age_threshold_hours, 72);
        assert_eq!(archive.priority_ceiling, 3);
        assert!(!archive.dry_run);
    }
}
