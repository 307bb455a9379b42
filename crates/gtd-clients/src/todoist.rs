//! Todoist client: the task source.
//!
//! Reads go through the REST v2 API (`/projects`, `/tasks`), moves go through
//! the Sync v9 API (`/sync` with an `item_move` command), since REST v2 has no
//! move endpoint.

use async_trait::async_trait;
use gtd_core::entities::{MoveAck, Project, Task};
use serde::Serialize;

use crate::error::RemoteError;
use crate::http::{DEFAULT_TIMEOUT, build_client, check_response, decode_json};

pub const DEFAULT_REST_URL: &str = "https://api.todoist.com/rest/v2";
pub const DEFAULT_SYNC_URL: &str = "https://api.todoist.com/sync/v9";

/// Read and move access to tasks and projects.
#[async_trait]
pub trait TaskSource: Send + Sync {
    /// List every project visible to the credential.
    async fn list_projects(&self) -> Result<Vec<Project>, RemoteError>;

    /// List tasks, optionally restricted to one project server-side.
    async fn list_tasks(&self, project_id: Option<&str>) -> Result<Vec<Task>, RemoteError>;

    /// Look a project up by exact name.
    async fn find_project(&self, name: &str) -> Result<Option<Project>, RemoteError> {
        let projects = self.list_projects().await?;
        Ok(Project::find_by_name(&projects, name).cloned())
    }

    /// Issue a single remote move. Called by [`TaskSource::move_task`] only
    /// when the move is not a dry run.
    async fn apply_move(
        &self,
        task_id: &str,
        destination_project_id: &str,
    ) -> Result<MoveAck, RemoteError>;

    /// Move a task to another project.
    ///
    /// With `dry_run` set nothing is sent and a descriptive no-op
    /// acknowledgement is returned.
    async fn move_task(
        &self,
        task_id: &str,
        destination_project_id: &str,
        dry_run: bool,
    ) -> Result<MoveAck, RemoteError> {
        if dry_run {
            tracing::info!(task_id, destination_project_id, dry_run, "moving task");
            return Ok(MoveAck::DryRun {
                description: format!(
                    "would move task_id={task_id} to project_id={destination_project_id}"
                ),
            });
        }
        tracing::info!(task_id, destination_project_id, "moving task");
        self.apply_move(task_id, destination_project_id).await
    }
}

/// One command of a sync batch.
#[derive(Debug, Serialize)]
struct SyncCommand<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    args: MoveArgs<'a>,
    uuid: String,
}

#[derive(Debug, Serialize)]
struct MoveArgs<'a> {
    id: &'a str,
    project_id: &'a str,
}

fn move_command<'a>(task_id: &'a str, project_id: &'a str) -> SyncCommand<'a> {
    SyncCommand {
        kind: "item_move",
        args: MoveArgs {
            id: task_id,
            project_id,
        },
        uuid: uuid::Uuid::new_v4().to_string(),
    }
}

/// Inspect a sync response for the `sync_status` marker of `uuid`.
///
/// A response without `sync_status` is malformed. A per-command status other
/// than `"ok"` is a rejection carrying the remote error object. A
/// `sync_status` with no entry for `uuid` is accepted as applied: the marker
/// is present and nothing reports a failure.
fn interpret_sync_response(
    body: &serde_json::Value,
    uuid: &str,
) -> Result<MoveAck, RemoteError> {
    let Some(sync_status) = body.get("sync_status") else {
        return Err(RemoteError::Malformed(format!(
            "sync response has no sync_status: {body}"
        )));
    };

    match sync_status.get(uuid) {
        None => Ok(MoveAck::Applied {
            sync_status: sync_status.clone(),
        }),
        Some(serde_json::Value::String(status)) if status == "ok" => Ok(MoveAck::Applied {
            sync_status: sync_status.clone(),
        }),
        Some(failure) => Err(RemoteError::Rejected {
            code: failure
                .get("error_code")
                .and_then(serde_json::Value::as_i64)
                .unwrap_or_default(),
            description: failure
                .get("error")
                .and_then(serde_json::Value::as_str)
                .map_or_else(|| failure.to_string(), str::to_string),
        }),
    }
}

/// HTTP-backed [`TaskSource`] for Todoist.
pub struct TodoistClient {
    http: reqwest::Client,
    api_token: String,
    rest_url: String,
    sync_url: String,
}

impl TodoistClient {
    /// Create a client against the public Todoist endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Http`] if the underlying HTTP client cannot be
    /// built.
    pub fn new(api_token: impl Into<String>) -> Result<Self, RemoteError> {
        Ok(Self {
            http: build_client(DEFAULT_TIMEOUT)?,
            api_token: api_token.into(),
            rest_url: DEFAULT_REST_URL.to_string(),
            sync_url: DEFAULT_SYNC_URL.to_string(),
        })
    }

    /// Point the client at different REST and Sync base URLs.
    #[must_use]
    pub fn with_base_urls(mut self, rest_url: impl Into<String>, sync_url: impl Into<String>) -> Self {
        self.rest_url = rest_url.into().trim_end_matches('/').to_string();
        self.sync_url = sync_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, RemoteError> {
        let resp = self
            .http
            .get(url)
            .bearer_auth(&self.api_token)
            .send()
            .await?;
        decode_json(check_response(resp).await?).await
    }
}

#[async_trait]
impl TaskSource for TodoistClient {
    async fn list_projects(&self) -> Result<Vec<Project>, RemoteError> {
        let projects: Vec<Project> = self.get_json(&format!("{}/projects", self.rest_url)).await?;
        tracing::debug!(count = projects.len(), "fetched projects");
        Ok(projects)
    }

    async fn list_tasks(&self, project_id: Option<&str>) -> Result<Vec<Task>, RemoteError> {
        let url = match project_id {
            Some(id) => format!(
                "{}/tasks?project_id={}",
                self.rest_url,
                urlencoding::encode(id)
            ),
            None => format!("{}/tasks", self.rest_url),
        };
        let tasks: Vec<Task> = self.get_json(&url).await?;
        tracing::debug!(count = tasks.len(), project_id, "fetched tasks");
        Ok(tasks)
    }

    async fn apply_move(
        &self,
        task_id: &str,
        destination_project_id: &str,
    ) -> Result<MoveAck, RemoteError> {
        let command = move_command(task_id, destination_project_id);
        let uuid = command.uuid.clone();
        let commands = serde_json::to_string(&[command])?;

        let resp = self
            .http
            .post(format!("{}/sync", self.sync_url))
            .bearer_auth(&self.api_token)
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(format!("commands={}", urlencoding::encode(&commands)))
            .send()
            .await?;
        let body: serde_json::Value = decode_json(check_response(resp).await?).await?;

        let ack = interpret_sync_response(&body, &uuid)?;
        tracing::debug!(task_id, %uuid, "move acknowledged");
        Ok(ack)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn move_command_serializes_to_sync_shape() {
        let command = move_command("t1", "p2");
        let value = serde_json::to_value(&command).unwrap();
        assert_eq!(value["type"], "item_move");
        assert_eq!(value["args"]["id"], "t1");
        assert_eq!(value["args"]["project_id"], "p2");
        assert_eq!(value["uuid"].as_str().map(str::len), Some(36));
    }

    #[test]
    fn every_command_gets_a_fresh_uuid() {
        assert_ne!(move_command("t1", "p2").uuid, move_command("t1", "p2").uuid);
    }

    #[test]
    fn missing_sync_status_is_malformed() {
        let err = interpret_sync_response(&json!({"full_sync": false}), "u").unwrap_err();
        assert!(matches!(err, RemoteError::Malformed(_)));
    }

    #[test]
    fn ok_status_is_applied() {
        let body = json!({"sync_status": {"u1": "ok"}});
        let ack = interpret_sync_response(&body, "u1").unwrap();
        assert_eq!(
            ack,
            MoveAck::Applied {
                sync_status: json!({"u1": "ok"})
            }
        );
    }

    #[test]
    fn status_without_our_uuid_is_applied() {
        let body = json!({"sync_status": {}});
        let ack = interpret_sync_response(&body, "u1").unwrap();
        assert_eq!(ack, MoveAck::Applied { sync_status: json!({}) });
    }

    #[test]
    fn per_command_error_is_rejected() {
        let body = json!({
            "sync_status": {"u1": {"error_code": 20, "error": "Item not found"}}
        });
        match interpret_sync_response(&body, "u1").unwrap_err() {
            RemoteError::Rejected { code, description } => {
                assert_eq!(code, 20);
                assert_eq!(description, "Item not found");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn dry_run_never_touches_the_network() {
        // Unroutable base URL: any request would fail.
        let client = TodoistClient::new("token")
            .unwrap()
            .with_base_urls("http://127.0.0.1:9", "http://127.0.0.1:9");
        let ack = client.move_task("t1", "p2", true).await.unwrap();
        match ack {
            MoveAck::DryRun { description } => {
                assert!(description.contains("t1"));
                assert!(description.contains("p2"));
            }
            MoveAck::Applied { .. } => panic!("dry run must not apply"),
        }
    }
}
