//! # Infrastructure Layer
//!
//! Concrete implementations of the services that talk to the outside world:
//! - **SMS**: the TweetSMS gateway client with its transport abstraction
//! - **Config**: loading [`AppConfig`] from the environment and `.env` files
//! - **Logging**: tracing subscriber initialisation

use bp_shared::config::AppConfig;

/// Tracing subscriber setup
pub mod logging;

/// SMS gateway module - TweetSMS client and transports
pub mod sms;

pub use logging::init_tracing;

/// Load the application configuration
///
/// Reads the environment-specific `.env` file (falling back to `.env`) and
/// then the process environment. The SMS gateway section is validated only
/// when an API key is present, so PIN-only deployments can leave it unset.
pub fn load_config() -> Result<AppConfig, InfrastructureError> {
    let environment = bp_shared::Environment::from_env();
    if dotenvy::from_filename(environment.env_file()).is_err() {
        dotenvy::dotenv().ok();
    }

    let config = AppConfig::from_env();

    if !config.sms.api_key.is_empty() {
        config.sms.validate().map_err(InfrastructureError::Config)?;
    }
    tracing::debug!(
        environment = ?config.environment,
        sms_configured = !config.sms.api_key.is_empty(),
        "Configuration loaded"
    );

    Ok(config)
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be decoded as JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Transport failure not raised by the HTTP client itself
    #[error("Transport error: {0}")]
    Transport(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),
}
