//! Recipient phone number utilities
//!
//! The gateway only delivers to Palestinian/Israeli mobile numbers. Accepted
//! inputs carry an optional `972`, `00972`, `+972` or `0` prefix followed by
//! `5` and eight more digits. Every accepted form canonicalizes to the
//! `972`-prefixed form the gateway expects.

use once_cell::sync::Lazy;
use regex::Regex;

use super::validation::SmsValidationError;

/// Country calling code used by the gateway
pub const COUNTRY_CODE: &str = "972";

static MOBILE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(972|00972|\+972|0)?5\d{8}$").unwrap()
});

/// Remove all whitespace from a phone number
pub fn strip_whitespace(phone: &str) -> String {
    phone.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Check if a phone number matches the accepted mobile pattern
pub fn is_valid_mobile(phone: &str) -> bool {
    MOBILE_REGEX.is_match(&strip_whitespace(phone))
}

/// Canonicalize a phone number to the `972`-prefixed form
///
/// Strips a leading `00`, then a leading `+`, then replaces a leading `0`
/// with `972`; anything not already starting with `972` gets it prepended.
/// The result is stable under repeated application for accepted inputs.
pub fn normalize_recipient(phone: &str) -> String {
    let mut number = strip_whitespace(phone);

    if let Some(rest) = number.strip_prefix("00") {
        number = rest.to_string();
    }
    if let Some(rest) = number.strip_prefix('+') {
        number = rest.to_string();
    }

    if let Some(rest) = number.strip_prefix('0') {
        format!("{}{}", COUNTRY_CODE, rest)
    } else if number.starts_with(COUNTRY_CODE) {
        number
    } else {
        format!("{}{}", COUNTRY_CODE, number)
    }
}

/// Validate a recipient and return its normalized form
pub fn validate_recipient(phone: &str) -> Result<String, SmsValidationError> {
    let stripped = strip_whitespace(phone);
    if stripped.is_empty() {
        return Err(SmsValidationError::EmptyRecipient);
    }
    if !MOBILE_REGEX.is_match(&stripped) {
        return Err(SmsValidationError::InvalidRecipient { phone: stripped });
    }
    Ok(normalize_recipient(&stripped))
}

/// Mask a phone number for logs (e.g., 972*****6099)
pub fn mask_phone_number(phone: &str) -> String {
    let digits: String = strip_whitespace(phone);
    let len = digits.chars().count();
    if len >= 7 {
        let head: String = digits.chars().take(3).collect();
        let tail: String = digits.chars().skip(len - 4).collect();
        format!("{}{}{}", head, "*".repeat(len - 7), tail)
    } else {
        "****".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_all_prefix_forms() {
        for input in [
            "0592106099",
            "592106099",
            "972592106099",
            "00972592106099",
            "+972592106099",
            "+972 59 210 6099",
        ] {
            assert_eq!(
                validate_recipient(input).unwrap(),
                "972592106099",
                "input {input}"
            );
        }
    }

    #[test]
    fn test_rejects_non_mobile_numbers() {
        assert!(validate_recipient("123").is_err());
        assert!(validate_recipient("0412106099").is_err()); // landline prefix
        assert!(validate_recipient("05921060999").is_err()); // too long
        assert!(validate_recipient("+970592106099").is_err()); // other country code
        assert_eq!(
            validate_recipient("   ").unwrap_err(),
            SmsValidationError::EmptyRecipient
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for input in ["0592106099", "+972592106099", "00972592106099", "592106099"] {
            let once = normalize_recipient(input);
            assert_eq!(normalize_recipient(&once), once);
        }
    }

    #[test]
    fn test_is_valid_mobile() {
        assert!(is_valid_mobile("0599 123 456"));
        assert!(!is_valid_mobile("abc"));
    }

    #[test]
    fn test_mask_phone_number() {
        assert_eq!(mask_phone_number("972592106099"), "972*****6099");
        assert_eq!(mask_phone_number("0592106099"), "059***6099");
        assert_eq!(mask_phone_number("12345"), "****");
    }
}
