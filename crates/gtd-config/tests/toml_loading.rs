//! Integration tests for TOML configuration loading.
//!
//! Uses `figment::Jail` for sandboxed files and env vars.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use gtd_config::GtdConfig;
use pretty_assertions::assert_eq;

#[test]
fn loads_every_section_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[todoist]
api_token = "todo-token"
web_url = "https://app.todoist.example"

[telegram]
api_token = "123:abc"
user_id = 424242

[toggl]
api_token = "toggl-token"
workspace_id = 7

[triage]
marker_label = "next"
limit = 5
excluded_projects = ["Someday", "Reference"]

[archive]
source_project = "Incoming"
age_threshold_hours = 24
dry_run = true

[reply]
timeout_secs = 30
offset_path = "/tmp/gtd-offset"
"#,
        )?;

        let config: GtdConfig = Figment::from(Serialized::defaults(GtdConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert!(config.todoist.is_configured());
        assert_eq!(config.todoist.web_url, "https://app.todoist.example");
        assert_eq!(config.todoist.rest_url, "https://api.todoist.com/rest/v2");
        assert!(config.telegram.is_configured());
        assert_eq!(config.telegram.user_id, 424_242);
        assert!(config.toggl.is_configured());
        assert_eq!(config.toggl.workspace_id, 7);
        assert_eq!(config.triage.marker_label, "next");
        assert_eq!(config.triage.limit, 5);
        assert_eq!(config.triage.excluded_projects, vec!["Someday", "Reference"]);
        assert_eq!(config.archive.source_project, "Incoming");
        assert_eq!(config.archive.destination_project, "inbox_archive");
        assert_eq!(config.archive.age_threshold_hours, 24);
        assert!(config.archive.dry_run);
        assert_eq!(config.reply.timeout_secs, 30);
        assert_eq!(config.reply.long_poll_secs, 120);
        assert_eq!(config.reply.offset_path.to_str(), Some("/tmp/gtd-offset"));
        Ok(())
    });
}

#[test]
fn project_file_is_picked_up_by_load() {
    Jail::expect_with(|jail| {
        std::fs::create_dir_all(jail.directory().join(".gtd")).map_err(|e| e.to_string())?;
        jail.create_file(
            ".gtd/config.toml",
            r#"
[telegram]
api_token = "from-project"
user_id = 1
"#,
        )?;

        let config = GtdConfig::load().map_err(|e| e.to_string())?;
        assert_eq!(config.telegram.api_token, "from-project");
        assert!(config.require_telegram().is_ok());
        Ok(())
    });
}

#[test]
fn wrong_type_is_an_error() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[triage]
limit = "many"
"#,
        )?;

        let result: Result<GtdConfig, _> =
            Figment::from(Serialized::defaults(GtdConfig::default()))
                .merge(Toml::file("config.toml"))
                .extract();
        assert!(result.is_err());
        Ok(())
    });
}
