//! # gtd-triage
//!
//! Rules over the task list and the two scheduled jobs built on them:
//! - [`classify`]: projects with too many or zero marker-labeled tasks, stale
//!   low-priority tasks
//! - [`relocate`]: sequential, best-effort task moves with a dry-run mode
//! - [`digest`]: the chat report of a classification
//! - [`pipeline`]: `report_projects` and `archive_stale_tasks`
//!
//! Classification is pure. Everything that talks to a remote does so through
//! the capability traits of `gtd-clients`.

pub mod classify;
pub mod digest;
pub mod pipeline;
pub mod relocate;

mod error;

pub use classify::{LimitRules, find_over_and_under_limit_projects, find_stale_low_priority_tasks};
pub use digest::{format_digest, send_digest};
pub use error::TriageError;
pub use pipeline::{ArchiveRules, Delivery, archive_stale_tasks, report_projects};
pub use relocate::relocate;
