//! Pure classification rules over a task snapshot.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Duration, Utc};
use gtd_core::entities::{Empty, OverLimit, Project, Task};

/// Default web front-end the search links point at.
pub const DEFAULT_WEB_URL: &str = "https://todoist.com/app";

/// Thresholds for [`find_over_and_under_limit_projects`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitRules {
    /// Label that marks a task as actionable.
    pub marker_label: String,
    /// Largest number of marked tasks a project may carry.
    pub limit: usize,
    /// Projects never reported as empty.
    pub excluded_projects: BTreeSet<String>,
    /// Base of the generated search links.
    pub web_url: String,
}

impl Default for LimitRules {
    fn default() -> Self {
        Self {
            marker_label: "next_action".to_string(),
            limit: 3,
            excluded_projects: BTreeSet::new(),
            web_url: DEFAULT_WEB_URL.to_string(),
        }
    }
}

impl LimitRules {
    /// Search link listing the marked tasks of one project.
    #[must_use]
    pub fn labeled_search_url(&self, project_name: &str) -> String {
        self.search_url(&format!("@{}&#{project_name}", self.marker_label))
    }

    /// Search link listing every task of one project.
    #[must_use]
    pub fn project_search_url(&self, project_name: &str) -> String {
        self.search_url(&format!("#{project_name}"))
    }

    fn search_url(&self, query: &str) -> String {
        format!(
            "{}/search/{}",
            self.web_url.trim_end_matches('/'),
            urlencoding::encode(query)
        )
    }
}

/// Count marker-labeled tasks per owning project name.
///
/// Tasks whose project is unknown are skipped with a debug line; the task and
/// project listings are not fetched atomically, so this can happen.
fn count_marked_by_project<'a>(
    tasks: &[Task],
    projects: &'a [Project],
    marker_label: &str,
) -> HashMap<&'a str, usize> {
    let mut counts = HashMap::new();
    for task in tasks.iter().filter(|task| task.has_label(marker_label)) {
        let Some(project) = Project::find_by_id(projects, &task.project_id) else {
            tracing::debug!(
                task_id = %task.id,
                project_id = %task.project_id,
                "skipping task with unknown project"
            );
            continue;
        };
        *counts.entry(project.name.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Split projects into those over the marker limit and those with no marked
/// task at all.
///
/// Order of both vectors is unspecified. A project lands in at most one of
/// them; projects in neither are fine.
#[must_use]
pub fn find_over_and_under_limit_projects(
    tasks: &[Task],
    projects: &[Project],
    rules: &LimitRules,
) -> (Vec<OverLimit>, Vec<Empty>) {
    let counts = count_marked_by_project(tasks, projects, &rules.marker_label);

    let too_many = counts
        .iter()
        .filter(|&(_, &count)| count > rules.limit)
        .map(|(&name, &count)| OverLimit {
            project_name: name.to_string(),
            task_count: count,
            limit: rules.limit,
            search_url: rules.labeled_search_url(name),
        })
        .collect();

    let zero = projects
        .iter()
        .filter(|project| !counts.contains_key(project.name.as_str()))
        .filter(|project| !rules.excluded_projects.contains(&project.name))
        .map(|project| Empty {
            project_name: project.name.clone(),
            search_url: rules.project_search_url(&project.name),
        })
        .collect();

    (too_many, zero)
}

/// Tasks strictly older than `age_threshold` with priority strictly below
/// `priority_ceiling`.
#[must_use]
pub fn find_stale_low_priority_tasks(
    tasks: &[Task],
    age_threshold: Duration,
    priority_ceiling: i32,
    now: DateTime<Utc>,
) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| now - task.created_at > age_threshold)
        .filter(|task| task.priority < priority_ceiling)
        .cloned()
        .collect()
}
