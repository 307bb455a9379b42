use anyhow::Context;
use gtd_config::GtdConfig;
use gtd_triage::{Delivery, LimitRules, report_projects};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ReportArgs;
use crate::context;
use crate::output::output;

/// Handle `gtd report`.
pub async fn handle(args: &ReportArgs, config: &GtdConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let source = context::task_source(config)?;
    let rules = limit_rules(args, config);

    let report = if args.no_send {
        report_projects(&source, &rules, Delivery::Skip).await
    } else {
        let (messenger, chat_id) = context::messenger(config)?;
        let delivery = Delivery::Chat {
            messenger: &messenger,
            chat_id,
        };
        report_projects(&source, &rules, delivery).await
    };
    let report = report.context("project report failed")?;

    output(&report, flags.format)
}

fn limit_rules(args: &ReportArgs, config: &GtdConfig) -> LimitRules {
    let triage = &config.triage;
    LimitRules {
        marker_label: args
            .label
            .clone()
            .unwrap_or_else(|| triage.marker_label.clone()),
        limit: args.limit.unwrap_or(triage.limit),
        excluded_projects: triage
            .excluded_projects
            .iter()
            .chain(&args.exclude)
            .cloned()
            .collect(),
        web_url: config.todoist.web_url.clone(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn flags_override_and_extend_config() {
        let mut config = GtdConfig::default();
        config.triage.excluded_projects = vec!["Someday".to_string()];
        let args = ReportArgs {
            limit: Some(5),
            label: None,
            exclude: vec!["Reference".to_string()],
            no_send: true,
        };

        let rules = limit_rules(&args, &config);

        assert_eq!(rules.limit, 5);
        assert_eq!(rules.marker_label, "next_action");
        assert_eq!(
            rules.excluded_projects.into_iter().collect::<Vec<_>>(),
            vec!["Reference".to_string(), "Someday".to_string()]
        );
        assert_eq!(rules.web_url, "https://todoist.com/app");
    }
}
