//! PIN creation flow

use std::sync::Arc;

use constant_time_eq::constant_time_eq;
use tracing::{error, info};

use crate::domain::entities::pin::Pin;
use crate::errors::PinError;

use super::traits::{GuardListenerTrait, PinStoreTrait};

/// Validates a new PIN and hands it to the host's store
pub struct PinCreationService<S: PinStoreTrait, L: GuardListenerTrait> {
    store: Arc<S>,
    listener: Arc<L>,
}

impl<S: PinStoreTrait, L: GuardListenerTrait> PinCreationService<S, L> {
    pub fn new(store: Arc<S>, listener: Arc<L>) -> Self {
        Self { store, listener }
    }

    /// Create a PIN from the primary entry and its confirmation
    ///
    /// Checks run in order: format and strength of `pin`, then equality with
    /// `confirmation`. A store failure is reported as `Unexpected`.
    pub async fn submit(&self, pin: &str, confirmation: &str) -> Result<Pin, PinError> {
        let pin = Pin::new_strong(pin)?;

        if !constant_time_eq(pin.as_str().as_bytes(), confirmation.as_bytes()) {
            return Err(PinError::Mismatch);
        }

        self.store.store_pin(&pin).await.map_err(|e| {
            error!(
                event = "pin_store_failed",
                error = %e,
                "Host rejected the new PIN"
            );
            PinError::Unexpected { message: e }
        })?;

        info!(event = "pin_created", "New PIN accepted");
        self.listener.on_success(&pin);
        Ok(pin)
    }

    /// Abandon the flow
    pub fn cancel(self) {
        self.listener.on_close();
    }
}
