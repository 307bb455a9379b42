//! Scheduled jobs: project report and inbox archive.

use chrono::{DateTime, Duration, Utc};
use gtd_clients::{Messenger, TaskSource};
use gtd_core::CoreError;
use gtd_core::entities::Project;
use gtd_core::responses::{ArchiveReport, ProjectReport};

use crate::classify::{LimitRules, find_over_and_under_limit_projects, find_stale_low_priority_tasks};
use crate::digest::{format_digest, send_digest};
use crate::error::TriageError;
use crate::relocate::relocate;

/// Where the report goes, if anywhere.
#[derive(Clone, Copy)]
pub enum Delivery<'a> {
    Chat {
        messenger: &'a dyn Messenger,
        chat_id: i64,
    },
    Skip,
}

/// Classify every project against `rules` and deliver the digest.
///
/// # Errors
///
/// Returns [`TriageError`] on the first failed listing or on a failed send.
pub async fn report_projects(
    source: &dyn TaskSource,
    rules: &LimitRules,
    delivery: Delivery<'_>,
) -> Result<ProjectReport, TriageError> {
    let projects = source.list_projects().await?;
    let tasks = source.list_tasks(None).await?;
    let (too_many, zero) = find_over_and_under_limit_projects(&tasks, &projects, rules);
    tracing::info!(
        projects = projects.len(),
        tasks = tasks.len(),
        too_many = too_many.len(),
        zero = zero.len(),
        "classified projects"
    );

    let sent = match delivery {
        Delivery::Chat { messenger, chat_id } => {
            let digest = format_digest(&rules.marker_label, &too_many, &zero);
            send_digest(messenger, chat_id, &digest).await?
        }
        Delivery::Skip => false,
    };

    Ok(ProjectReport {
        too_many,
        zero,
        sent,
    })
}

/// Thresholds and endpoints of [`archive_stale_tasks`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveRules {
    pub source_project: String,
    pub destination_project: String,
    pub age_threshold: Duration,
    pub priority_ceiling: i32,
    pub dry_run: bool,
}

impl Default for ArchiveRules {
    fn default() -> Self {
        Self {
            source_project: "Inbox".to_string(),
            destination_project: "inbox_archive".to_string(),
            age_threshold: Duration::hours(72),
            priority_ceiling: 3,
            dry_run: false,
        }
    }
}

async fn resolve_project(source: &dyn TaskSource, name: &str) -> Result<Project, TriageError> {
    source
        .find_project(name)
        .await?
        .ok_or_else(|| {
            CoreError::ProjectNotFound {
                name: name.to_string(),
            }
            .into()
        })
}

/// Move stale low-priority tasks out of the source project.
///
/// # Errors
///
/// Returns [`TriageError`] when either project is missing or a listing fails.
/// Individual move failures are reported in [`ArchiveReport::outcomes`].
pub async fn archive_stale_tasks(
    source: &dyn TaskSource,
    rules: &ArchiveRules,
    now: DateTime<Utc>,
) -> Result<ArchiveReport, TriageError> {
    let from = resolve_project(source, &rules.source_project).await?;
    let to = resolve_project(source, &rules.destination_project).await?;

    let tasks = source.list_tasks(Some(&from.id)).await?;
    let candidates =
        find_stale_low_priority_tasks(&tasks, rules.age_threshold, rules.priority_ceiling, now);
    tracing::info!(
        source_project = %from.name,
        listed = tasks.len(),
        candidates = candidates.len(),
        "selected stale tasks"
    );

    let outcomes = relocate(source, &candidates, &to.id, rules.dry_run).await;
    Ok(ArchiveReport {
        source_project_id: from.id,
        destination_project_id: to.id,
        candidates,
        outcomes,
    })
}
