//! Shared utilities and common types for the beneficiary portal
//!
//! This crate provides common functionality used across all workspace crates:
//! - Configuration types (environment, logging, PIN guard, SMS gateway)
//! - Language types for bilingual (English/Arabic) messages
//! - Utility functions (recipient normalization, sender/message validation)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, Environment, LogFormat, LoggingConfig, PinGuardConfig, SmsGatewayConfig,
    SupportContactConfig,
};
pub use types::Language;
pub use utils::{phone, validation};
