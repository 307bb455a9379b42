//! Make sure a time entry is running.

use gtd_clients::{Messenger, TimeTracker};
use gtd_core::responses::{EntryReason, EntryReport};

use crate::coordinator::{ReplyCoordinator, ReplyOutcome};
use crate::error::ReplyError;

pub const NOT_RUNNING_NOTICE: &str = "No Toggl time entry found";

/// Start an entry from the user's reply when nothing is running.
///
/// # Errors
///
/// Returns [`ReplyError`] when the tracker, the messenger or the offset store
/// fails. A user who does not answer yields [`EntryReason::Timeout`].
pub async fn assure_running_entry(
    tracker: &dyn TimeTracker,
    coordinator: &mut ReplyCoordinator,
    workspace_id: i64,
) -> Result<EntryReport, ReplyError> {
    if let Some(entry) = tracker.current_entry().await? {
        tracing::info!(entry_id = entry.id, "time entry already running");
        return Ok(EntryReport {
            reason: EntryReason::Running,
            time_entry: entry.description.unwrap_or_default(),
        });
    }

    match coordinator.ask_for_entry().await? {
        ReplyOutcome::Replied(description) => {
            tracker.start_entry(&description, workspace_id).await?;
            Ok(EntryReport {
                reason: EntryReason::UserStarted,
                time_entry: description,
            })
        }
        ReplyOutcome::TimedOut => {
            tracing::info!("no reply, leaving tracker idle");
            Ok(EntryReport {
                reason: EntryReason::Timeout,
                time_entry: String::new(),
            })
        }
    }
}

/// Tell the user nothing is running, without waiting for an answer.
///
/// # Errors
///
/// Returns [`ReplyError`] when the tracker or the messenger fails.
pub async fn notify_if_not_running(
    tracker: &dyn TimeTracker,
    messenger: &dyn Messenger,
    chat_id: i64,
) -> Result<EntryReport, ReplyError> {
    if let Some(entry) = tracker.current_entry().await? {
        return Ok(EntryReport {
            reason: EntryReason::Running,
            time_entry: entry.description.unwrap_or_default(),
        });
    }

    tracing::info!("no running time entry");
    messenger.send(chat_id, NOT_RUNNING_NOTICE, None).await?;
    Ok(EntryReport {
        reason: EntryReason::Notified,
        time_entry: String::new(),
    })
}
