//! Business services containing domain logic and use cases.

pub mod pin;

// Re-export commonly used types
pub use pin::{
    GuardListenerTrait, LockoutState, PinCreationService, PinGuard, PinLockout, PinStoreTrait,
};
