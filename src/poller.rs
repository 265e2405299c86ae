//! # Poller
//!
//! The bot's single control loop: fetch events since the checkpoint,
//! validate the batch, report the first homework's status on change, sleep,
//! repeat. Errors from fetch/validate/describe are converted to one chat
//! message each and deduplicated against the last error sent; notification
//! failures are logged and swallowed.

use std::time::Duration;

use crate::api::{StatusSource, validate};
use crate::error::BotError;
use crate::notify::Notifier;
use crate::verdict::describe;

/// Fixed text sent whenever a cycle finds no new events. Sent every idle
/// cycle, unlike status changes it is not deduplicated.
pub const NO_NEW_STATUSES: &str = "В ответе нет новых статусов.";

pub struct Poller<S, N> {
    source: S,
    notifier: N,
    poll_interval: Duration,
    /// Lower bound of the next query window. Advances only on a fully
    /// successful cycle so a failed window is re-requested.
    checkpoint: i64,
    last_status: String,
    last_error: String,
}

impl<S: StatusSource, N: Notifier> Poller<S, N> {
    pub fn new(source: S, notifier: N, poll_interval: Duration, checkpoint: i64) -> Self {
        Self {
            source,
            notifier,
            poll_interval,
            checkpoint,
            last_status: String::new(),
            last_error: String::new(),
        }
    }

    pub fn checkpoint(&self) -> i64 {
        self.checkpoint
    }

    /// Run forever. Sleeps the fixed interval after every cycle regardless
    /// of outcome; only process termination stops the loop.
    pub async fn run(&mut self) {
        loop {
            self.run_cycle().await;
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// One poll cycle without the trailing sleep.
    pub async fn run_cycle(&mut self) {
        match self.poll_once().await {
            Ok(current_date) => self.checkpoint = current_date,
            Err(err) => {
                tracing::error!("poll cycle failed: {err}");
                let message = format!("Сбой в работе программы: {err}");
                if message != self.last_error {
                    self.notify(&message).await;
                    self.last_error = message;
                }
            }
        }
    }

    /// Fetch, validate, and report. Returns the `current_date` the
    /// checkpoint should advance to.
    async fn poll_once(&mut self) -> Result<i64, BotError> {
        let response = self.source.fetch(self.checkpoint).await?;
        let batch = validate(&response)?;

        match batch.homeworks.first() {
            Some(record) => {
                // Only the first record in a batch is reported; later ones
                // will be picked up once they become the head of a window.
                let message = describe(record)?;
                if message != self.last_status {
                    self.notify(&message).await;
                    self.last_status = message;
                }
            }
            None => {
                tracing::debug!("no new statuses in this window");
                self.notify(NO_NEW_STATUSES).await;
            }
        }

        Ok(batch.current_date)
    }

    /// Best-effort send. A failing notifier is logged, never propagated:
    /// surfacing it would need the very channel that just failed.
    async fn notify(&self, text: &str) {
        tracing::info!("sending notification: {text}");
        match self.notifier.send(text).await {
            Ok(()) => tracing::debug!("notification delivered"),
            Err(err) => tracing::error!("{err}"),
        }
    }
}
