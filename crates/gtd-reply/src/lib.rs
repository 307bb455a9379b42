//! # gtd-reply
//!
//! Ask the user a question over chat and wait, bounded, for the answer.
//!
//! The messaging API hands out updates by offset, so the lowest unconsumed
//! update id lives in an [`OffsetStore`] that outlives the process. The
//! [`ReplyCoordinator`] sends the prompt, long-polls from that offset in a
//! cancellable task, and races it against the wait window. [`entry`] builds
//! the running-time-entry job on top of it.

pub mod coordinator;
pub mod entry;
pub mod store;

mod error;

pub use coordinator::{Clock, ReplyCoordinator, ReplyOutcome, ReplySettings, ReplyState, SystemClock};
pub use entry::{assure_running_entry, notify_if_not_running};
pub use error::{ReplyError, StoreError};
pub use store::{FileOffsetStore, MemoryOffsetStore, OffsetStore};
