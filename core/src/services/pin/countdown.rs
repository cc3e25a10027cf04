//! Lockout countdown task
//!
//! While verification is locked a background task recomputes the remaining
//! time once per tick and publishes it on a `watch` channel. The task ends by
//! itself when the lock lifts and is aborted when its handle is dropped.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use serde::Serialize;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use super::clock::Clock;
use super::lockout::{PinLockout, TickOutcome};

/// Render a number of seconds as `MM:SS`, or `H:MM:SS` from one hour up
pub fn format_countdown(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

/// What the countdown display should show
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountdownSnapshot {
    pub remaining_seconds: i64,
    pub display: String,
    pub unlocked: bool,
}

impl CountdownSnapshot {
    pub fn locked(remaining_seconds: i64) -> Self {
        Self {
            remaining_seconds,
            display: format_countdown(remaining_seconds),
            unlocked: false,
        }
    }

    pub fn unlocked() -> Self {
        Self {
            remaining_seconds: 0,
            display: format_countdown(0),
            unlocked: true,
        }
    }
}

/// Handle to a running countdown task
pub struct LockoutCountdown {
    handle: JoinHandle<()>,
    receiver: watch::Receiver<CountdownSnapshot>,
}

impl LockoutCountdown {
    /// Spawn the countdown on the current tokio runtime
    pub fn start(
        lockout: Arc<Mutex<PinLockout>>,
        clock: Arc<dyn Clock>,
        period: StdDuration,
        initial: CountdownSnapshot,
    ) -> Self {
        let (sender, receiver) = watch::channel(initial);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                let outcome = lockout.lock().await.tick(clock.now());

                match outcome {
                    TickOutcome::Locked { remaining_seconds } => {
                        debug!(remaining_seconds, "Lockout countdown tick");
                        sender.send_replace(CountdownSnapshot::locked(remaining_seconds));
                    }
                    TickOutcome::Unlocked | TickOutcome::Idle => {
                        info!(event = "pin_countdown_finished", "Lockout countdown finished");
                        sender.send_replace(CountdownSnapshot::unlocked());
                        break;
                    }
                }
            }
        });

        Self { handle, receiver }
    }

    /// Receiver for countdown updates
    pub fn subscribe(&self) -> watch::Receiver<CountdownSnapshot> {
        self.receiver.clone()
    }

    /// Latest published snapshot
    pub fn current(&self) -> CountdownSnapshot {
        self.receiver.borrow().clone()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stop the task now
    pub fn stop(self) {
        // Drop aborts the task
    }
}

impl Drop for LockoutCountdown {
    fn drop(&mut self) {
        if !self.handle.is_finished() {
            debug!("Stopping lockout countdown task");
            self.handle.abort();
        }
    }
}
