//! Prompt the user and wait, bounded, for one reply.
//!
//! ```text
//! Idle -> Prompted -> Waiting -> Replied | TimedOut | Failed
//! ```
//!
//! The poll loop runs as its own task and is raced against the wait window.
//! When the window closes the loop is cancelled and joined before
//! [`ReplyCoordinator::ask_for_entry`] returns, so no cursor write can land
//! after the caller has seen the outcome.

use std::sync::Arc;
use std::time::Duration;

use gtd_clients::{Messenger, Update};
use tokio_util::sync::CancellationToken;

use crate::error::ReplyError;
use crate::store::OffsetStore;

pub const DEFAULT_PROMPT: &str = "no running Toggl entry. please fill in:";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);
pub const DEFAULT_LONG_POLL: Duration = Duration::from_secs(120);

/// Source of the prompt timestamp, in unix seconds.
pub trait Clock: Send + Sync {
    fn now_unix(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplySettings {
    /// Chat the prompt is sent to.
    pub chat_id: i64,
    pub prompt: String,
    /// Wall-clock length of the whole wait.
    pub timeout: Duration,
    /// Pause between polls that found nothing.
    pub poll_interval: Duration,
    /// How long the server may hold one poll open.
    pub long_poll: Duration,
}

impl ReplySettings {
    #[must_use]
    pub fn new(chat_id: i64) -> Self {
        Self {
            chat_id,
            prompt: DEFAULT_PROMPT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            long_poll: DEFAULT_LONG_POLL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyState {
    Idle,
    Prompted,
    Waiting,
    Replied,
    TimedOut,
    Failed,
}

/// How a wait ended when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyOutcome {
    Replied(String),
    /// The user did not answer in time. Not an error.
    TimedOut,
}

fn confirmation(text: &str) -> String {
    format!("Ok. Recorded: '{text}'")
}

pub struct ReplyCoordinator {
    messenger: Arc<dyn Messenger>,
    store: Arc<dyn OffsetStore>,
    clock: Arc<dyn Clock>,
    settings: ReplySettings,
    state: ReplyState,
}

impl ReplyCoordinator {
    #[must_use]
    pub fn new(
        messenger: Arc<dyn Messenger>,
        store: Arc<dyn OffsetStore>,
        settings: ReplySettings,
    ) -> Self {
        Self {
            messenger,
            store,
            clock: Arc::new(SystemClock),
            settings,
            state: ReplyState::Idle,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub const fn state(&self) -> ReplyState {
        self.state
    }

    #[must_use]
    pub const fn settings(&self) -> &ReplySettings {
        &self.settings
    }

    /// Send the prompt and wait for the first reply sent after it.
    ///
    /// # Errors
    ///
    /// Returns [`ReplyError`] when the prompt cannot be sent, a poll fails, or
    /// the offset store fails. A missing answer is [`ReplyOutcome::TimedOut`].
    pub async fn ask_for_entry(&mut self) -> Result<ReplyOutcome, ReplyError> {
        let result = self.run().await;
        self.state = match &result {
            Ok(ReplyOutcome::Replied(_)) => ReplyState::Replied,
            Ok(ReplyOutcome::TimedOut) => ReplyState::TimedOut,
            Err(_) => ReplyState::Failed,
        };
        result
    }

    async fn run(&mut self) -> Result<ReplyOutcome, ReplyError> {
        // Replies can arrive before the send is acknowledged.
        let query_time = self.clock.now_unix();
        self.messenger
            .send(self.settings.chat_id, &self.settings.prompt, None)
            .await?;
        self.state = ReplyState::Prompted;
        tracing::info!(chat_id = self.settings.chat_id, query_time, "prompt sent");

        let cancel = CancellationToken::new();
        let poll = PollLoop {
            messenger: Arc::clone(&self.messenger),
            store: Arc::clone(&self.store),
            query_time,
            poll_interval: self.settings.poll_interval,
            long_poll: self.settings.long_poll,
            cancel: cancel.clone(),
        };
        let mut handle = tokio::spawn(poll.run());
        self.state = ReplyState::Waiting;

        let answer = tokio::select! {
            joined = &mut handle => joined,
            () = tokio::time::sleep(self.settings.timeout) => {
                tracing::info!(timeout = ?self.settings.timeout, "reply wait window exhausted");
                cancel.cancel();
                handle.await
            }
        }
        .map_err(|e| ReplyError::Aborted(e.to_string()))??;

        Ok(answer.map_or(ReplyOutcome::TimedOut, ReplyOutcome::Replied))
    }
}

struct PollLoop {
    messenger: Arc<dyn Messenger>,
    store: Arc<dyn OffsetStore>,
    query_time: i64,
    poll_interval: Duration,
    long_poll: Duration,
    cancel: CancellationToken,
}

impl PollLoop {
    /// Poll until a fresh text message arrives or the token is cancelled.
    ///
    /// Returns `None` only when cancelled.
    async fn run(self) -> Result<Option<String>, ReplyError> {
        loop {
            let offset = self.store.get_or(0).await?;
            let updates = tokio::select! {
                biased;
                () = self.cancel.cancelled() => return Ok(None),
                polled = self.messenger.get_updates(offset, self.long_poll) => polled?,
            };
            // A returned update must never be requested again.
            let advanced = self.store.increment(1).await?;
            tracing::debug!(offset, advanced, count = updates.len(), "polled for reply");

            if let Some(text) = self.consume(updates, advanced).await? {
                return Ok(Some(text));
            }

            tokio::select! {
                biased;
                () = self.cancel.cancelled() => return Ok(None),
                () = tokio::time::sleep(self.poll_interval) => {}
            }
        }
    }

    /// Take the first message sent after the prompt.
    ///
    /// Earlier messages are skipped but the cursor still moves past them.
    async fn consume(
        &self,
        updates: Vec<Update>,
        advanced: i64,
    ) -> Result<Option<String>, ReplyError> {
        let mut skipped_past = advanced;
        for update in updates {
            let Some(message) = update.message else {
                skipped_past = skipped_past.max(update.update_id + 1);
                continue;
            };
            if message.date < self.query_time {
                tracing::debug!(
                    update_id = update.update_id,
                    date = message.date,
                    query_time = self.query_time,
                    "skipping message sent before the prompt"
                );
                skipped_past = skipped_past.max(update.update_id + 1);
                continue;
            }
            let Some(text) = message.text else {
                skipped_past = skipped_past.max(update.update_id + 1);
                continue;
            };
            if self.cancel.is_cancelled() {
                return Ok(None);
            }

            self.messenger
                .send(message.chat.id, &confirmation(&text), None)
                .await?;
            self.store.set(update.update_id + 1).await?;
            tracing::info!(update_id = update.update_id, "reply recorded");
            return Ok(Some(text));
        }

        if skipped_past > advanced {
            self.store.set(skipped_past).await?;
        }
        Ok(None)
    }
}
