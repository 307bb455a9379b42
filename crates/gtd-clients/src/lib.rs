//! # gtd-clients
//!
//! HTTP clients for the three remote services the toolkit talks to:
//! - Todoist REST v2 + Sync v9 ([`todoist`]): projects, tasks, task moves
//! - Telegram Bot API ([`telegram`]): send a message, long-poll for updates
//! - Toggl Track v9 ([`toggl`]): current entry, start a new entry
//!
//! Each service is exposed as a capability trait ([`TaskSource`],
//! [`Messenger`], [`TimeTracker`]) with one HTTP-backed implementation and an
//! in-memory fake in [`fake`]. Clients carry their credential and nothing
//! else; every call is independent.

pub mod fake;
pub mod telegram;
pub mod todoist;
pub mod toggl;

mod error;
mod http;

pub use error::{RemoteError, SendError};
pub use telegram::{Messenger, ParseMode, TelegramClient, Update};
pub use todoist::{TaskSource, TodoistClient};
pub use toggl::{TimeTracker, TogglClient};

/// User agent sent with every request.
pub const USER_AGENT: &str = "gtd-scripts/0.1";
