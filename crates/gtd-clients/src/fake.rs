//! In-memory implementations of the client traits.
//!
//! They behave like the remote services closely enough to drive the
//! pipelines end to end without a network: the task source really moves
//! tasks, the messenger honours the long-poll offset, the tracker remembers
//! the entry it started.

use std::collections::{BTreeSet, VecDeque};
use std::time::Duration;

use async_trait::async_trait;
use gtd_core::entities::{MoveAck, Project, Task, TimeEntry};
use tokio::sync::Mutex;

use crate::error::{RemoteError, SendError};
use crate::telegram::{Messenger, ParseMode, Update};
use crate::toggl::TimeTracker;
use crate::todoist::TaskSource;

// ── Task source ────────────────────────────────────────────────────

#[derive(Default)]
struct TaskState {
    projects: Vec<Project>,
    tasks: Vec<Task>,
    failing_moves: BTreeSet<String>,
    moves: Vec<(String, String)>,
    fail_listing: bool,
}

/// [`TaskSource`] backed by vectors.
#[derive(Default)]
pub struct MemoryTaskSource {
    state: Mutex<TaskState>,
}

impl MemoryTaskSource {
    #[must_use]
    pub fn new(projects: Vec<Project>, tasks: Vec<Task>) -> Self {
        Self {
            state: Mutex::new(TaskState {
                projects,
                tasks,
                ..TaskState::default()
            }),
        }
    }

    /// Make every move of `task_id` fail with a rejection.
    pub async fn fail_moves_of(&self, task_id: &str) {
        self.state
            .lock()
            .await
            .failing_moves
            .insert(task_id.to_string());
    }

    /// Make listing calls fail with a 503.
    pub async fn fail_listing(&self) {
        self.state.lock().await.fail_listing = true;
    }

    /// Moves that reached the "remote", as `(task_id, project_id)` pairs.
    pub async fn applied_moves(&self) -> Vec<(String, String)> {
        self.state.lock().await.moves.clone()
    }

    pub async fn tasks(&self) -> Vec<Task> {
        self.state.lock().await.tasks.clone()
    }
}

fn unavailable() -> RemoteError {
    RemoteError::Status {
        status: 503,
        body: "service unavailable".to_string(),
    }
}

#[async_trait]
impl TaskSource for MemoryTaskSource {
    async fn list_projects(&self) -> Result<Vec<Project>, RemoteError> {
        let state = self.state.lock().await;
        if state.fail_listing {
            return Err(unavailable());
        }
        Ok(state.projects.clone())
    }

    async fn list_tasks(&self, project_id: Option<&str>) -> Result<Vec<Task>, RemoteError> {
        let state = self.state.lock().await;
        if state.fail_listing {
            return Err(unavailable());
        }
        Ok(state
            .tasks
            .iter()
            .filter(|task| project_id.is_none_or(|id| task.project_id == id))
            .cloned()
            .collect())
    }

    async fn apply_move(
        &self,
        task_id: &str,
        destination_project_id: &str,
    ) -> Result<MoveAck, RemoteError> {
        let mut state = self.state.lock().await;
        if state.failing_moves.contains(task_id) {
            return Err(RemoteError::Rejected {
                code: 20,
                description: format!("Item not found: {task_id}"),
            });
        }
        let Some(task) = state.tasks.iter_mut().find(|task| task.id == task_id) else {
            return Err(RemoteError::Rejected {
                code: 20,
                description: format!("Item not found: {task_id}"),
            });
        };
        task.project_id = destination_project_id.to_string();
        state
            .moves
            .push((task_id.to_string(), destination_project_id.to_string()));
        Ok(MoveAck::Applied {
            sync_status: serde_json::json!({ task_id: "ok" }),
        })
    }
}

// ── Messenger ──────────────────────────────────────────────────────

/// A message handed to [`ScriptedMessenger::send`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub chat_id: i64,
    pub text: String,
    pub mode: Option<ParseMode>,
}

#[derive(Default)]
struct MessengerState {
    sent: Vec<SentMessage>,
    pending: Vec<Update>,
    polled_offsets: Vec<i64>,
    scheduled: VecDeque<(usize, Update)>,
    fail_polls: bool,
    reject_sends: Option<(i64, String)>,
}

/// [`Messenger`] with a scripted update stream.
///
/// Updates are returned with Telegram offset semantics: every poll yields the
/// pending updates whose id is at least the requested offset. Polls return
/// immediately instead of holding the connection.
#[derive(Default)]
pub struct ScriptedMessenger {
    state: Mutex<MessengerState>,
}

impl ScriptedMessenger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `update` visible to every poll from now on.
    pub async fn push_update(&self, update: Update) {
        self.state.lock().await.pending.push(update);
    }

    /// Make `update` visible once `after_polls` polls have completed.
    pub async fn schedule_update(&self, after_polls: usize, update: Update) {
        self.state
            .lock()
            .await
            .scheduled
            .push_back((after_polls, update));
    }

    /// Make every poll fail with a transport-level error.
    pub async fn fail_polls(&self) {
        self.state.lock().await.fail_polls = true;
    }

    /// Make every send fail with the given structured rejection.
    pub async fn reject_sends(&self, code: i64, description: &str) {
        self.state.lock().await.reject_sends = Some((code, description.to_string()));
    }

    pub async fn sent(&self) -> Vec<SentMessage> {
        self.state.lock().await.sent.clone()
    }

    /// Offsets requested so far, in order.
    pub async fn polled_offsets(&self) -> Vec<i64> {
        self.state.lock().await.polled_offsets.clone()
    }
}

#[async_trait]
impl Messenger for ScriptedMessenger {
    async fn send(
        &self,
        chat_id: i64,
        text: &str,
        mode: Option<ParseMode>,
    ) -> Result<(), SendError> {
        let mut state = self.state.lock().await;
        if let Some((code, description)) = &state.reject_sends {
            return Err(SendError::Rejected {
                code: *code,
                description: description.clone(),
            });
        }
        state.sent.push(SentMessage {
            chat_id,
            text: text.to_string(),
            mode,
        });
        Ok(())
    }

    async fn get_updates(&self, offset: i64, _wait: Duration) -> Result<Vec<Update>, RemoteError> {
        let mut state = self.state.lock().await;
        if state.fail_polls {
            return Err(RemoteError::Malformed("scripted poll failure".to_string()));
        }

        let completed = state.polled_offsets.len();
        while state
            .scheduled
            .front()
            .is_some_and(|(after, _)| *after <= completed)
        {
            if let Some((_, update)) = state.scheduled.pop_front() {
                state.pending.push(update);
            }
        }

        state.polled_offsets.push(offset);
        Ok(state
            .pending
            .iter()
            .filter(|update| update.update_id >= offset)
            .cloned()
            .collect())
    }
}

// ── Time tracker ───────────────────────────────────────────────────

#[derive(Default)]
struct TrackerState {
    current: Option<TimeEntry>,
    started: Vec<(String, i64)>,
}

/// [`TimeTracker`] holding at most one running entry.
#[derive(Default)]
pub struct MemoryTracker {
    state: Mutex<TrackerState>,
}

impl MemoryTracker {
    #[must_use]
    pub fn new(current: Option<TimeEntry>) -> Self {
        Self {
            state: Mutex::new(TrackerState {
                current,
                started: Vec::new(),
            }),
        }
    }

    /// Entries started through [`TimeTracker::start_entry`], as
    /// `(description, workspace_id)` pairs.
    pub async fn started(&self) -> Vec<(String, i64)> {
        self.state.lock().await.started.clone()
    }
}

#[async_trait]
impl TimeTracker for MemoryTracker {
    async fn current_entry(&self) -> Result<Option<TimeEntry>, RemoteError> {
        Ok(self.state.lock().await.current.clone())
    }

    async fn start_entry(&self, description: &str, workspace_id: i64) -> Result<(), RemoteError> {
        let mut state = self.state.lock().await;
        let id = i64::try_from(state.started.len()).unwrap_or(i64::MAX) + 1;
        state.current = Some(TimeEntry {
            id,
            workspace_id,
            project_id: None,
            description: Some(description.to_string()),
            start: Some(chrono::Utc::now()),
            stop: None,
            duration: TimeEntry::RUNNING,
            tags: Vec::new(),
            billable: false,
        });
        state.started.push((description.to_string(), workspace_id));
        Ok(())
    }
}
