use anyhow::Context;
use gtd_clients::TaskSource;
use gtd_config::GtdConfig;

use crate::cli::GlobalFlags;
use crate::context;
use crate::output::output;

/// Handle `gtd projects`.
pub async fn handle(config: &GtdConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let source = context::task_source(config)?;
    let projects = source
        .list_projects()
        .await
        .context("failed to list projects")?;
    output(&projects, flags.format)
}
