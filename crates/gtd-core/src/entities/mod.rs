//! Snapshots of remote domain objects and the summaries derived from them.
//!
//! Nothing here is persisted locally. Every invocation fetches fresh
//! snapshots and recomputes the derived values.

mod classification;
mod moves;
mod project;
mod task;
mod time_entry;

pub use classification::{ClassificationResult, Empty, OverLimit};
pub use moves::{MoveAck, MoveOutcome, MoveStatus};
pub use project::Project;
pub use task::Task;
pub use time_entry::TimeEntry;
