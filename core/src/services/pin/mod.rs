//! PIN access guard
//!
//! This module provides the PIN flows that gate sensitive beneficiary data:
//! - PIN creation with format, strength and confirmation checks
//! - PIN verification with attempt counting and timed lockout
//! - A countdown task that runs only while verification is locked
//! - A support contact link for locked-out users

mod clock;
mod countdown;
mod creation;
mod guard;
mod lockout;
mod support;
mod traits;

#[cfg(test)]
mod tests;

pub use clock::{Clock, ManualClock, SystemClock};
pub use countdown::{format_countdown, CountdownSnapshot, LockoutCountdown};
pub use creation::PinCreationService;
pub use guard::PinGuard;
pub use lockout::{LockoutState, PinLockout, TickOutcome};
pub use support::SupportContact;
pub use traits::{GuardListenerTrait, PinStoreTrait};
