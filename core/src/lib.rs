//! # Beneficiary Portal Core
//!
//! Domain layer for the PIN access guard that protects sensitive beneficiary
//! data. This crate contains the PIN value object and strength rules, the
//! creation and verification flows, the lockout state machine and the
//! collaborator traits implemented by the host application.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    classify_strength, sanitize_pin_input, validate_pin, Pin, PinStrength, PIN_LENGTH,
};
pub use errors::{DomainError, DomainResult, PinError};
pub use services::{
    GuardListenerTrait, LockoutState, PinCreationService, PinGuard, PinLockout, PinStoreTrait,
};
