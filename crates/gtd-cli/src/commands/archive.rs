use anyhow::Context;
use chrono::Duration;
use gtd_config::GtdConfig;
use gtd_triage::{ArchiveRules, archive_stale_tasks};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ArchiveArgs;
use crate::context;
use crate::output::output;

/// Handle `gtd archive`.
///
/// Prints the report even when some moves failed, then fails the command so
/// the scheduler notices.
pub async fn handle(args: &ArchiveArgs, config: &GtdConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let source = context::task_source(config)?;
    let rules = archive_rules(args, config);

    let report = archive_stale_tasks(&source, &rules, chrono::Utc::now())
        .await
        .context("archive run failed")?;
    output(&report, flags.format)?;

    let failures = report.failures();
    if failures > 0 {
        anyhow::bail!(
            "{failures} of {} task moves failed",
            report.outcomes.len()
        );
    }
    Ok(())
}

fn archive_rules(args: &ArchiveArgs, config: &GtdConfig) -> ArchiveRules {
    let archive = &config.archive;
    ArchiveRules {
        source_project: args
            .from
            .clone()
            .unwrap_or_else(|| archive.source_project.clone()),
        destination_project: args
            .to
            .clone()
            .unwrap_or_else(|| archive.destination_project.clone()),
        age_threshold: Duration::hours(args.older_than_hours.unwrap_or(archive.age_threshold_hours)),
        priority_ceiling: args.priority_below.unwrap_or(archive.priority_ceiling),
        dry_run: args.dry_run || archive.dry_run,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn config_defaults_apply_without_flags() {
        let args = ArchiveArgs {
            from: None,
            to: None,
            older_than_hours: None,
            priority_below: None,
            dry_run: false,
        };
        assert_eq!(archive_rules(&args, &GtdConfig::default()), ArchiveRules::default());
    }

    #[test]
    fn dry_run_from_either_source_wins() {
        let mut config = GtdConfig::default();
        config.archive.dry_run = true;
        let args = ArchiveArgs {
            from: Some("Later".to_string()),
            to: None,
            older_than_hours: Some(24),
            priority_below: None,
            dry_run: false,
        };

        let rules = archive_rules(&args, &config);

        assert!(rules.dry_run);
        assert_eq!(rules.source_project, "Later");
        assert_eq!(rules.age_threshold, Duration::hours(24));
    }
}
