//! Build remote clients from configuration.

use anyhow::Context;
use gtd_clients::{TelegramClient, TodoistClient, TogglClient};
use gtd_config::GtdConfig;
use gtd_reply::FileOffsetStore;

pub fn task_source(config: &GtdConfig) -> anyhow::Result<TodoistClient> {
    let todoist = config.require_todoist()?;
    Ok(TodoistClient::new(&todoist.api_token)
        .context("failed to build todoist client")?
        .with_base_urls(&todoist.rest_url, &todoist.sync_url))
}

/// The Telegram client and the chat it talks to.
pub fn messenger(config: &GtdConfig) -> anyhow::Result<(TelegramClient, i64)> {
    let telegram = config.require_telegram()?;
    let client = TelegramClient::new(&telegram.api_token)
        .context("failed to build telegram client")?
        .with_base_url(&telegram.base_url);
    Ok((client, telegram.user_id))
}

/// The Toggl client and the workspace new entries go to.
pub fn time_tracker(config: &GtdConfig) -> anyhow::Result<(TogglClient, i64)> {
    let toggl = config.require_toggl()?;
    let client = TogglClient::new(&toggl.api_token)
        .context("failed to build toggl client")?
        .with_base_url(&toggl.base_url);
    Ok((client, toggl.workspace_id))
}

pub fn offset_store(config: &GtdConfig) -> FileOffsetStore {
    FileOffsetStore::new(&config.reply.offset_path)
}
