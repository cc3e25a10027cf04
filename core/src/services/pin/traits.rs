//! Traits for host application integration

use async_trait::async_trait;

use crate::domain::entities::pin::Pin;

/// Storage for the beneficiary's PIN, owned by the host application
#[async_trait]
pub trait PinStoreTrait: Send + Sync {
    /// Accept a newly created PIN
    async fn store_pin(&self, pin: &Pin) -> Result<(), String>;
    /// Check a submitted PIN; `Ok(false)` means the PIN was wrong
    async fn verify_pin(&self, pin: &Pin) -> Result<bool, String>;
}

/// Callbacks fired when a PIN flow finishes
pub trait GuardListenerTrait: Send + Sync {
    /// Called once per successful creation or verification
    fn on_success(&self, pin: &Pin);
    /// Called when the user cancels the flow
    fn on_close(&self);
}
