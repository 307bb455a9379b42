mod clients;
mod config_warnings;

pub use clients::{messenger, offset_store, task_source, time_tracker};
pub use config_warnings::warn_unconfigured;
