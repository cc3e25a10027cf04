//! PIN guard configuration module

use serde::{Deserialize, Serialize};

/// Configuration for the PIN verification flow
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PinGuardConfig {
    /// Failed verifications allowed before a lockout
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Lockout length in minutes
    #[serde(default = "default_lockout_duration_minutes")]
    pub lockout_duration_minutes: i64,

    /// Countdown refresh period in seconds
    #[serde(default = "default_tick_interval_seconds")]
    pub tick_interval_seconds: u64,

    /// Support contact shown to locked-out users
    #[serde(default)]
    pub support: SupportContactConfig,
}

/// Support contact configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SupportContactConfig {
    /// WhatsApp number in international form, digits only
    pub whatsapp_number: String,

    /// Message template; `{id}` is replaced by the subject's identifier
    pub message_template: String,
}

impl Default for SupportContactConfig {
    fn default() -> Self {
        Self {
            whatsapp_number: String::from("972592106099"),
            message_template: String::from(
                "مرحباً، أحتاج إلى المساعدة في رمز الدخول. رقم الهوية: {id}",
            ),
        }
    }
}

impl Default for PinGuardConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            lockout_duration_minutes: default_lockout_duration_minutes(),
            tick_interval_seconds: default_tick_interval_seconds(),
            support: SupportContactConfig::default(),
        }
    }
}

impl PinGuardConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let max_attempts = std::env::var("PIN_MAX_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|v: &u32| *v > 0)
            .unwrap_or(defaults.max_attempts);
        let lockout_duration_minutes = std::env::var("PIN_LOCKOUT_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|v: &i64| *v > 0)
            .unwrap_or(defaults.lockout_duration_minutes);
        let mut support = defaults.support.clone();
        if let Ok(number) = std::env::var("SUPPORT_WHATSAPP_NUMBER") {
            support.whatsapp_number = number;
        }

        Self {
            max_attempts,
            lockout_duration_minutes,
            tick_interval_seconds: defaults.tick_interval_seconds,
            support,
        }
    }

    /// Set the attempt limit
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set the lockout length
    pub fn with_lockout_minutes(mut self, minutes: i64) -> Self {
        self.lockout_duration_minutes = minutes;
        self
    }

    /// Lockout length in seconds
    pub fn lockout_duration_seconds(&self) -> i64 {
        self.lockout_duration_minutes * 60
    }
}

fn default_max_attempts() -> u32 {
    5
}

fn default_lockout_duration_minutes() -> i64 {
    30
}

fn default_tick_interval_seconds() -> u64 {
    1
}
