use gtd_clients::TaskSource;
use gtd_core::entities::{MoveOutcome, MoveStatus, Task};

/// Move every task to `destination_project_id`, one request at a time.
///
/// A failed move is recorded and the remaining tasks are still attempted.
/// Nothing is retried. The result holds one outcome per input task, in input
/// order.
pub async fn relocate(
    source: &dyn TaskSource,
    tasks: &[Task],
    destination_project_id: &str,
    dry_run: bool,
) -> Vec<MoveOutcome> {
    let mut outcomes = Vec::with_capacity(tasks.len());
    for task in tasks {
        let status = match source
            .move_task(&task.id, destination_project_id, dry_run)
            .await
        {
            Ok(ack) => MoveStatus::Moved { ack },
            Err(e) => {
                tracing::warn!(task_id = %task.id, error = %e, "task move failed");
                MoveStatus::Failed {
                    error: e.to_string(),
                }
            }
        };
        outcomes.push(MoveOutcome {
            task_id: task.id.clone(),
            content: task.content.clone(),
            destination_project_id: destination_project_id.to_string(),
            status,
        });
    }

    let failed = outcomes.iter().filter(|o| !o.is_success()).count();
    tracing::info!(
        attempted = outcomes.len(),
        failed,
        dry_run,
        destination_project_id,
        "relocation finished"
    );
    outcomes
}
