//! # gtd-core
//!
//! Domain types and error types shared by every GTD automation crate.
//!
//! This crate has no I/O. It provides:
//! - Entity snapshots fetched from the task and time-tracking services
//!   (projects, tasks, time entries)
//! - Classification results derived from those snapshots
//! - Move acknowledgements and per-task move outcomes
//! - Pipeline report types returned by the `gtd` binary
//! - A serde adapter for the task service's fixed timestamp format

pub mod entities;
pub mod errors;
pub mod remote_time;
pub mod responses;

pub use errors::CoreError;
