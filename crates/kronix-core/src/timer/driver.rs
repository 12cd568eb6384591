//! Async tick source for [`FocusTimer`].
//!
//! The driver owns the only interval that ticks a timer. The interval lives
//! inside `run` and is dropped when `run` returns, so a cancelled or
//! finished session cannot keep decrementing.

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use super::engine::FocusTimer;
use crate::error::ValidationError;
use crate::events::Event;
use crate::notify::{completion_alert, Notifier};

/// How a driven session ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SessionOutcome {
    Completed { event: Event, notified: bool },
    Cancelled { remaining_secs: u64 },
}

pub struct TimerDriver {
    timer: FocusTimer,
    period: Duration,
}

impl TimerDriver {
    pub fn new(timer: FocusTimer) -> Self {
        Self {
            timer,
            period: Duration::from_secs(1),
        }
    }

    pub fn timer(&self) -> &FocusTimer {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut FocusTimer {
        &mut self.timer
    }

    pub fn into_timer(self) -> FocusTimer {
        self.timer
    }

    /// Start the timer and tick it until it completes or `cancel` resolves.
    ///
    /// `on_tick` sees the timer after every decrement. On cancel the timer
    /// is paused with its remaining time intact.
    ///
    /// # Errors
    /// Returns [`ValidationError::MissingObjective`] if the timer cannot
    /// start.
    pub async fn run<N, C, F>(
        &mut self,
        notifier: &N,
        cancel: C,
        mut on_tick: F,
    ) -> Result<SessionOutcome, ValidationError>
    where
        N: Notifier + ?Sized,
        C: Future<Output = ()>,
        F: FnMut(&FocusTimer),
    {
        if let Some(event) = self.timer.start()? {
            tracing::debug!(?event, "focus session started");
        }

        let mut ticks = interval_at(Instant::now() + self.period, self.period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(cancel);

        loop {
            tokio::select! {
                _ = &mut cancel => {
                    self.timer.pause();
                    tracing::debug!(remaining = self.timer.remaining_secs(), "focus session cancelled");
                    return Ok(SessionOutcome::Cancelled {
                        remaining_secs: self.timer.remaining_secs(),
                    });
                }
                _ = ticks.tick() => {
                    let completed = self.timer.tick();
                    on_tick(&self.timer);
                    if let Some(event) = completed {
                        let notified = completion_alert(notifier, &event);
                        tracing::info!(notified, "focus session complete");
                        return Ok(SessionOutcome::Completed { event, notified });
                    }
                }
            }
        }
    }
}
