use anyhow::Context;
use gtd_clients::TaskSource;
use gtd_config::GtdConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::TasksArgs;
use crate::context;
use crate::output::output;

/// Handle `gtd tasks`.
pub async fn handle(args: &TasksArgs, config: &GtdConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let source = context::task_source(config)?;

    let project_id = match &args.project {
        Some(name) => Some(
            source
                .find_project(name)
                .await
                .context("failed to list projects")?
                .with_context(|| format!("project '{name}' not found"))?
                .id,
        ),
        None => None,
    };

    let tasks = source
        .list_tasks(project_id.as_deref())
        .await
        .context("failed to list tasks")?;
    output(&tasks, flags.format)
}
