use gtd_config::GtdConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &GtdConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &GtdConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();
    let sections = [
        ("Todoist", "GTD_TODOIST", "GTD_TODOIST__API_TOKEN", config.todoist.is_configured()),
        ("Telegram", "GTD_TELEGRAM", "GTD_TELEGRAM__USER_ID", config.telegram.is_configured()),
        ("Toggl", "GTD_TOGGL", "GTD_TOGGL__WORKSPACE_ID", config.toggl.is_configured()),
    ];

    sections
        .into_iter()
        .filter(|&(_, prefix, _, configured)| !configured && has_env_prefix(&env_keys, prefix))
        .map(|(name, prefix, example, _)| {
            format!(
                "{name} config is incomplete while {prefix}* env vars exist. Set every required field and use double underscores (example: {example})."
            )
        })
        .collect()
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}
