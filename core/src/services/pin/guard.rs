//! PIN verification flow

use std::sync::Arc;
use std::time::Duration as StdDuration;

use bp_shared::config::PinGuardConfig;
use tokio::sync::{watch, Mutex};
use tracing::{error, info, warn};

use crate::domain::entities::pin::Pin;
use crate::errors::{DomainResult, PinError};

use super::clock::{Clock, SystemClock};
use super::countdown::{CountdownSnapshot, LockoutCountdown};
use super::lockout::{LockoutState, PinLockout};
use super::support::SupportContact;
use super::traits::{GuardListenerTrait, PinStoreTrait};

/// Gate in front of sensitive beneficiary data
///
/// Owns the lockout state for one verification session and the countdown task
/// that runs while locked. Submissions take `&mut self`, so two can never be
/// in flight on the same guard.
pub struct PinGuard<S: PinStoreTrait, L: GuardListenerTrait> {
    store: Arc<S>,
    listener: Arc<L>,
    clock: Arc<dyn Clock>,
    lockout: Arc<Mutex<PinLockout>>,
    countdown: Option<LockoutCountdown>,
    support: SupportContact,
    tick_interval: StdDuration,
    subject_id: String,
}

impl<S: PinStoreTrait, L: GuardListenerTrait> PinGuard<S, L> {
    /// Create a guard using wall-clock time
    pub fn new(
        store: Arc<S>,
        listener: Arc<L>,
        config: &PinGuardConfig,
        subject_id: impl Into<String>,
    ) -> DomainResult<Self> {
        Self::with_clock(store, listener, config, subject_id, Arc::new(SystemClock))
    }

    /// Create a guard with an explicit time source
    pub fn with_clock(
        store: Arc<S>,
        listener: Arc<L>,
        config: &PinGuardConfig,
        subject_id: impl Into<String>,
        clock: Arc<dyn Clock>,
    ) -> DomainResult<Self> {
        let lockout = PinLockout::from_config(config)?;
        Ok(Self {
            store,
            listener,
            clock,
            lockout: Arc::new(Mutex::new(lockout)),
            countdown: None,
            support: SupportContact::from(&config.support),
            tick_interval: StdDuration::from_secs(config.tick_interval_seconds.max(1)),
            subject_id: subject_id.into(),
        })
    }

    /// Submit a PIN for verification
    ///
    /// # Errors
    /// - `Locked` while locked out, without consuming an attempt
    /// - `InvalidFormat` for anything but six digits, without consuming an attempt
    /// - `Rejected` when the host says the PIN is wrong, or `Locked` if that
    ///   was the last allowed attempt
    /// - `Unexpected` when the host's check itself failed
    pub async fn submit(&mut self, raw: &str) -> Result<Pin, PinError> {
        let gate = self.lockout.lock().await.check_submit(self.clock.now());
        if let Err(locked) = gate {
            warn!(
                event = "pin_submit_while_locked",
                "PIN submitted while verification is locked"
            );
            return Err(locked);
        }
        // Not locked past this point; a countdown left over from an expired lock is done
        self.countdown = None;

        let pin = Pin::parse(raw)?;

        match self.store.verify_pin(&pin).await {
            Ok(true) => {
                self.lockout.lock().await.record_success();
                info!(event = "pin_verified", "PIN verified");
                self.listener.on_success(&pin);
                Ok(pin)
            }
            Ok(false) => {
                let now = self.clock.now();
                let (rejection, snapshot) = {
                    let mut lockout = self.lockout.lock().await;
                    let rejection = lockout.record_rejection(now);
                    let snapshot = lockout
                        .is_locked(now)
                        .then(|| CountdownSnapshot::locked(lockout.remaining_seconds(now)));
                    (rejection, snapshot)
                };

                warn!(
                    event = "pin_rejected",
                    code = rejection.code(),
                    "PIN verification failed"
                );
                if let Some(initial) = snapshot {
                    self.start_countdown(initial);
                }
                Err(rejection)
            }
            Err(message) => {
                error!(
                    event = "pin_verification_error",
                    error = %message,
                    "Host failed to check the PIN"
                );
                Err(PinError::Unexpected { message })
            }
        }
    }

    /// Current lockout state (expired locks are lifted first)
    pub async fn state(&self) -> LockoutState {
        let mut lockout = self.lockout.lock().await;
        lockout.expire(self.clock.now());
        lockout.state()
    }

    /// Seconds until submissions are accepted again
    pub async fn remaining_seconds(&self) -> i64 {
        self.lockout.lock().await.remaining_seconds(self.clock.now())
    }

    /// Attempts left before a lockout
    pub async fn remaining_attempts(&self) -> u32 {
        self.lockout.lock().await.remaining_attempts()
    }

    /// Put back state kept by the host from an earlier session
    pub async fn restore_state(&mut self, state: LockoutState) {
        let now = self.clock.now();
        let snapshot = {
            let mut lockout = self.lockout.lock().await;
            lockout.restore(state);
            lockout.expire(now);
            lockout
                .is_locked(now)
                .then(|| CountdownSnapshot::locked(lockout.remaining_seconds(now)))
        };
        match snapshot {
            Some(initial) => self.start_countdown(initial),
            None => self.countdown = None,
        }
    }

    /// Countdown updates while locked; `None` once the countdown has finished
    pub fn countdown(&self) -> Option<watch::Receiver<CountdownSnapshot>> {
        self.countdown
            .as_ref()
            .filter(|c| !c.is_finished())
            .map(LockoutCountdown::subscribe)
    }

    /// Whether a countdown task is currently running
    pub fn countdown_running(&self) -> bool {
        self.countdown
            .as_ref()
            .map(|c| !c.is_finished())
            .unwrap_or(false)
    }

    /// WhatsApp link to the support line for this subject
    pub fn support_link(&self) -> String {
        self.support.link(&self.subject_id)
    }

    /// Cancel the flow: stops the countdown and notifies the listener
    pub fn close(mut self) {
        if let Some(countdown) = self.countdown.take() {
            countdown.stop();
        }
        info!(event = "pin_guard_closed", "PIN verification closed");
        self.listener.on_close();
    }

    fn start_countdown(&mut self, initial: CountdownSnapshot) {
        self.countdown = Some(LockoutCountdown::start(
            self.lockout.clone(),
            self.clock.clone(),
            self.tick_interval,
            initial,
        ));
    }
}
