//! PIN guard error types
//!
//! Every variant renders as `"<English> | <Arabic>"`; use
//! [`PinError::localized`] to pick one side for display.

use bp_shared::types::Language;
use thiserror::Error;

use crate::services::pin::format_countdown;

/// Failures surfaced by the PIN creation and verification flows
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PinError {
    #[error("PIN must be exactly 6 digits | يجب أن يتكون رمز الدخول من 6 أرقام")]
    InvalidFormat,

    #[error("PIN confirmation does not match | رمز التأكيد غير مطابق")]
    Mismatch,

    #[error("PIN is too weak, avoid repeated or sequential digits | رمز الدخول ضعيف، تجنب الأرقام المكررة أو المتسلسلة")]
    TooWeak,

    #[error("Incorrect PIN, {remaining_attempts} attempts remaining | رمز الدخول غير صحيح، المحاولات المتبقية: {remaining_attempts}")]
    Rejected { remaining_attempts: u32 },

    #[error("Too many failed attempts, try again in {} | تم تجاوز عدد المحاولات المسموح، حاول مرة أخرى بعد {}", countdown(.retry_after_seconds), countdown(.retry_after_seconds))]
    Locked { retry_after_seconds: i64 },

    #[error("Unexpected error: {message} | حدث خطأ غير متوقع: {message}")]
    Unexpected { message: String },
}

fn countdown(seconds: &i64) -> String {
    format_countdown(*seconds)
}

impl PinError {
    /// Stable code for programmatic handling
    pub fn code(&self) -> &'static str {
        match self {
            PinError::InvalidFormat => "PIN_INVALID_FORMAT",
            PinError::Mismatch => "PIN_MISMATCH",
            PinError::TooWeak => "PIN_TOO_WEAK",
            PinError::Rejected { .. } => "PIN_REJECTED",
            PinError::Locked { .. } => "PIN_LOCKED",
            PinError::Unexpected { .. } => "PIN_UNEXPECTED",
        }
    }

    /// Message in a single language
    pub fn localized(&self, lang: Language) -> String {
        let text = self.to_string();
        match text.split_once(" | ") {
            Some((en, ar)) => match lang {
                Language::English => en.to_string(),
                Language::Arabic => ar.to_string(),
            },
            None => text,
        }
    }

    /// Whether this failure counted against the attempt limit
    pub fn consumes_attempt(&self) -> bool {
        matches!(self, PinError::Rejected { .. })
    }
}
