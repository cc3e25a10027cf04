//! Configuration module with business-specific sub-modules
//!
//! - `environment` - Environment detection and logging configuration
//! - `pin_guard` - PIN verification attempts, lockout and support contact
//! - `sms` - TweetSMS gateway endpoints and credentials

pub mod environment;
pub mod pin_guard;
pub mod sms;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use pin_guard::{PinGuardConfig, SupportContactConfig};
pub use sms::SmsGatewayConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// PIN guard configuration
    #[serde(default)]
    pub pin_guard: PinGuardConfig,

    /// SMS gateway configuration
    #[serde(default)]
    pub sms: SmsGatewayConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            pin_guard: PinGuardConfig::default(),
            sms: SmsGatewayConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Self {
        let env = Environment::from_env();
        let mut logging = LoggingConfig::for_environment(env);
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            logging.level = level;
        }

        Self {
            environment: env,
            pin_guard: PinGuardConfig::from_env(),
            sms: SmsGatewayConfig::from_env(),
            logging,
        }
    }
}
