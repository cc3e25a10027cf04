//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

pub use types::PinError;

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Pin(#[from] PinError),
}

pub type DomainResult<T> = Result<T, DomainError>;
