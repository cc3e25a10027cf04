//! Input validation for outgoing SMS requests

use serde::Serialize;
use thiserror::Error;

/// Maximum sender display name length accepted by the gateway
pub const SENDER_MAX_LENGTH: usize = 11;

/// Characters per segment for messages without Arabic text
pub const LATIN_SEGMENT_LIMIT: usize = 160;

/// Characters per segment for messages containing Arabic text
pub const ARABIC_SEGMENT_LIMIT: usize = 70;

/// Maximum number of concatenated segments per message
pub const MAX_SEGMENTS: usize = 10;

/// Validation failures for an SMS request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SmsValidationError {
    #[error("Recipient is required | رقم المستلم مطلوب")]
    EmptyRecipient,

    #[error("Invalid mobile number: {phone} | رقم الجوال غير صحيح: {phone}")]
    InvalidRecipient { phone: String },

    #[error("Sender name is required | اسم المرسل مطلوب")]
    EmptySender,

    #[error("Sender name must be at most {max} characters (got {length}) | يجب ألا يتجاوز اسم المرسل {max} حرفاً")]
    SenderTooLong { length: usize, max: usize },

    #[error("Message text is required | نص الرسالة مطلوب")]
    EmptyMessage,

    #[error("Message too long: {length} characters (max {max}) | الرسالة طويلة جداً: {length} حرفاً (الحد الأقصى {max})")]
    MessageTooLong { length: usize, max: usize },
}

/// Segmentation details of a valid message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MessageSegments {
    /// Message length in characters
    pub length: usize,
    /// Per-segment character limit that applied
    pub segment_limit: usize,
    /// Number of SMS parts the message will be sent as
    pub parts: usize,
    /// Whether Arabic characters were detected
    pub contains_arabic: bool,
}

/// Check whether a text contains characters from the Arabic block
pub fn contains_arabic(text: &str) -> bool {
    text.chars().any(|c| ('\u{0600}'..='\u{06FF}').contains(&c))
}

/// Validate a sender display name
pub fn validate_sender(sender: &str) -> Result<(), SmsValidationError> {
    if sender.trim().is_empty() {
        return Err(SmsValidationError::EmptySender);
    }
    let length = sender.chars().count();
    if length > SENDER_MAX_LENGTH {
        return Err(SmsValidationError::SenderTooLong {
            length,
            max: SENDER_MAX_LENGTH,
        });
    }
    Ok(())
}

/// Validate a message body and compute how many parts it will use
pub fn validate_message(message: &str) -> Result<MessageSegments, SmsValidationError> {
    if message.trim().is_empty() {
        return Err(SmsValidationError::EmptyMessage);
    }

    let contains_arabic = contains_arabic(message);
    let segment_limit = if contains_arabic {
        ARABIC_SEGMENT_LIMIT
    } else {
        LATIN_SEGMENT_LIMIT
    };
    let length = message.chars().count();
    let max = segment_limit * MAX_SEGMENTS;

    if length > max {
        return Err(SmsValidationError::MessageTooLong { length, max });
    }

    Ok(MessageSegments {
        length,
        segment_limit,
        parts: length.div_ceil(segment_limit),
        contains_arabic,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_length_boundary() {
        assert!(validate_sender("ABCDEFGHIJK").is_ok());
        assert_eq!(
            validate_sender("ABCDEFGHIJKL"),
            Err(SmsValidationError::SenderTooLong { length: 12, max: 11 })
        );
        assert_eq!(validate_sender(""), Err(SmsValidationError::EmptySender));
    }

    #[test]
    fn test_latin_segmentation() {
        assert_eq!(validate_message(&"a".repeat(140)).unwrap().parts, 1);
        assert_eq!(validate_message(&"a".repeat(160)).unwrap().parts, 1);
        assert_eq!(validate_message(&"a".repeat(161)).unwrap().parts, 2);
    }

    #[test]
    fn test_arabic_segmentation() {
        let segments = validate_message(&"ب".repeat(71)).unwrap();
        assert!(segments.contains_arabic);
        assert_eq!(segments.segment_limit, ARABIC_SEGMENT_LIMIT);
        assert_eq!(segments.parts, 2);

        // a single Arabic letter switches the whole message to the short limit
        let mixed = format!("{}ب", "a".repeat(70));
        assert_eq!(validate_message(&mixed).unwrap().parts, 2);
    }

    #[test]
    fn test_message_hard_cap() {
        assert_eq!(validate_message(&"a".repeat(1600)).unwrap().parts, 10);
        assert_eq!(
            validate_message(&"a".repeat(1601)),
            Err(SmsValidationError::MessageTooLong { length: 1601, max: 1600 })
        );
        assert!(validate_message(&"ب".repeat(701)).is_err());
        assert_eq!(validate_message("  "), Err(SmsValidationError::EmptyMessage));
    }
}
