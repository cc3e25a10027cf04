//! Attempt counting and timed lockout for PIN verification
//!
//! [`PinLockout`] is a plain value: every transition takes the current time
//! as an argument, so it can be driven from tests without timers.

use bp_shared::config::PinGuardConfig;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::{DomainError, DomainResult, PinError};

/// Verification lockout state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LockoutState {
    /// Accepting submissions; `attempts` failures so far
    Idle { attempts: u32 },
    /// Rejecting submissions until `until`
    Locked { until: DateTime<Utc> },
}

impl Default for LockoutState {
    fn default() -> Self {
        LockoutState::Idle { attempts: 0 }
    }
}

/// Result of a countdown tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing to count down
    Idle,
    /// Still locked
    Locked { remaining_seconds: i64 },
    /// The lock expired on this tick
    Unlocked,
}

/// Failed-attempt counter with timed lockout
#[derive(Debug, Clone)]
pub struct PinLockout {
    state: LockoutState,
    max_attempts: u32,
    lockout_duration: Duration,
}

impl PinLockout {
    /// Create a lockout tracker
    ///
    /// # Errors
    /// `DomainError::Validation` if `max_attempts` is zero or the duration is
    /// not positive.
    pub fn new(max_attempts: u32, lockout_duration: Duration) -> DomainResult<Self> {
        if max_attempts == 0 {
            return Err(DomainError::Validation {
                message: "max_attempts must be at least 1".to_string(),
            });
        }
        if lockout_duration <= Duration::zero() {
            return Err(DomainError::Validation {
                message: "lockout duration must be positive".to_string(),
            });
        }
        Ok(Self {
            state: LockoutState::default(),
            max_attempts,
            lockout_duration,
        })
    }

    pub fn from_config(config: &PinGuardConfig) -> DomainResult<Self> {
        let lockout_duration = Duration::try_minutes(config.lockout_duration_minutes)
            .ok_or_else(|| DomainError::Validation {
                message: format!(
                    "lockout duration of {} minutes is out of range",
                    config.lockout_duration_minutes
                ),
            })?;
        Self::new(config.max_attempts, lockout_duration)
    }

    pub fn state(&self) -> LockoutState {
        self.state
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Failed attempts counted so far (the limit while locked)
    pub fn attempts(&self) -> u32 {
        match self.state {
            LockoutState::Idle { attempts } => attempts,
            LockoutState::Locked { .. } => self.max_attempts,
        }
    }

    /// Attempts left before a lockout
    pub fn remaining_attempts(&self) -> u32 {
        self.max_attempts.saturating_sub(self.attempts())
    }

    pub fn is_locked(&self, now: DateTime<Utc>) -> bool {
        matches!(self.state, LockoutState::Locked { until } if now < until)
    }

    /// Whole seconds until the lock lifts, rounded up; 0 when not locked
    pub fn remaining_seconds(&self, now: DateTime<Utc>) -> i64 {
        match self.state {
            LockoutState::Locked { until } if now < until => {
                let millis = (until - now).num_milliseconds();
                (millis + 999) / 1000
            }
            _ => 0,
        }
    }

    /// Replace the state, e.g. with one saved by the host from an earlier session
    pub fn restore(&mut self, state: LockoutState) {
        self.state = match state {
            LockoutState::Idle { attempts } => LockoutState::Idle {
                attempts: attempts.min(self.max_attempts.saturating_sub(1)),
            },
            locked => locked,
        };
    }

    /// Lift an expired lock; returns true if the state changed
    pub fn expire(&mut self, now: DateTime<Utc>) -> bool {
        match self.state {
            LockoutState::Locked { until } if now >= until => {
                self.state = LockoutState::Idle { attempts: 0 };
                info!(event = "pin_lockout_expired", "PIN lockout expired, attempts reset");
                true
            }
            _ => false,
        }
    }

    /// Gate a submission
    ///
    /// # Errors
    /// `PinError::Locked` while the lock is active. Never consumes an attempt.
    pub fn check_submit(&mut self, now: DateTime<Utc>) -> Result<(), PinError> {
        self.expire(now);
        if self.is_locked(now) {
            return Err(PinError::Locked {
                retry_after_seconds: self.remaining_seconds(now),
            });
        }
        Ok(())
    }

    /// Count a rejected PIN and return the error to show
    pub fn record_rejection(&mut self, now: DateTime<Utc>) -> PinError {
        let attempts = match self.state {
            LockoutState::Idle { attempts } => attempts + 1,
            LockoutState::Locked { .. } => {
                return PinError::Locked {
                    retry_after_seconds: self.remaining_seconds(now),
                };
            }
        };

        if attempts >= self.max_attempts {
            // Durations past the calendar's end lock until its last instant
            let until = now
                .checked_add_signed(self.lockout_duration)
                .unwrap_or(DateTime::<Utc>::MAX_UTC);
            self.state = LockoutState::Locked { until };
            warn!(
                event = "pin_lockout_started",
                attempts = attempts,
                until = %until,
                "Maximum PIN attempts reached, verification locked"
            );
            PinError::Locked {
                retry_after_seconds: self.remaining_seconds(now),
            }
        } else {
            self.state = LockoutState::Idle { attempts };
            PinError::Rejected {
                remaining_attempts: self.max_attempts - attempts,
            }
        }
    }

    /// Reset the counter after a successful verification
    pub fn record_success(&mut self) {
        self.state = LockoutState::Idle { attempts: 0 };
    }

    /// Recompute the countdown; lifts the lock once `now` reaches its end
    pub fn tick(&mut self, now: DateTime<Utc>) -> TickOutcome {
        match self.state {
            LockoutState::Idle { .. } => TickOutcome::Idle,
            LockoutState::Locked { .. } => {
                if self.expire(now) {
                    TickOutcome::Unlocked
                } else {
                    TickOutcome::Locked {
                        remaining_seconds: self.remaining_seconds(now),
                    }
                }
            }
        }
    }
}
