use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use gtd_config::GtdConfig;
use gtd_reply::{ReplyCoordinator, ReplySettings, assure_running_entry, notify_if_not_running};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AssureEntryArgs;
use crate::context;
use crate::output::output;

/// Handle `gtd assure-entry`.
pub async fn handle(
    args: &AssureEntryArgs,
    config: &GtdConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let (tracker, workspace_id) = context::time_tracker(config)?;
    let (messenger, chat_id) = context::messenger(config)?;

    let report = if args.notify_only {
        notify_if_not_running(&tracker, &messenger, chat_id)
            .await
            .context("running-entry notice failed")?
    } else {
        let store = context::offset_store(config);
        tracing::debug!(path = %store.path().display(), "using reply offset file");
        let mut coordinator = ReplyCoordinator::new(
            Arc::new(messenger),
            Arc::new(store),
            reply_settings(args, config, chat_id),
        );
        assure_running_entry(&tracker, &mut coordinator, workspace_id)
            .await
            .context("running-entry check failed")?
    };

    output(&report, flags.format)
}

fn reply_settings(args: &AssureEntryArgs, config: &GtdConfig, chat_id: i64) -> ReplySettings {
    let reply = &config.reply;
    ReplySettings {
        chat_id,
        prompt: reply.prompt.clone(),
        timeout: Duration::from_secs(args.timeout_secs.unwrap_or(reply.timeout_secs)),
        poll_interval: Duration::from_millis(reply.poll_interval_ms),
        long_poll: Duration::from_secs(reply.long_poll_secs),
    }
}
