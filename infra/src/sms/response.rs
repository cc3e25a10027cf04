//! Typed results of gateway operations and decoding of raw response bodies

use bp_shared::types::{Language, LocalizedText};
use bp_shared::validation::SmsValidationError;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use super::error_codes::describe_gateway_error;

/// Code reported for transport failures and non-2xx responses
pub const TRANSPORT_FAILURE_CODE: &str = "-999";

/// Code reported when a response body has an unrecognised shape
pub const UNKNOWN_RESPONSE_CODE: &str = "unknown";

/// Category of an SMS failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SmsFailureKind {
    InvalidRecipient,
    InvalidSender,
    InvalidMessage,
    TransportFailure,
    GatewayError,
    UnknownResponse,
}

/// Failure result of `send` and `check_balance`
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{message_en} | {message_ar}")]
pub struct SmsFailure {
    pub kind: SmsFailureKind,
    pub code: String,
    pub message_en: String,
    pub message_ar: String,
}

impl SmsFailure {
    fn new(kind: SmsFailureKind, code: impl Into<String>, text: LocalizedText) -> Self {
        Self {
            kind,
            code: code.into(),
            message_en: text.en,
            message_ar: text.ar,
        }
    }

    /// Result code returned by the gateway, looked up in the error table
    pub fn gateway(code: &str) -> Self {
        let code = code.trim();
        Self::new(SmsFailureKind::GatewayError, code, describe_gateway_error(code))
    }

    /// Non-2xx response from the gateway
    pub fn connection_failed() -> Self {
        Self::transport("Server connection failed")
    }

    /// No response received; `message_en` carries the underlying error text
    pub fn transport(message_en: impl Into<String>) -> Self {
        Self::new(
            SmsFailureKind::TransportFailure,
            TRANSPORT_FAILURE_CODE,
            LocalizedText::new(message_en, "فشل الاتصال بالخادم"),
        )
    }

    /// Body did not match any known shape
    pub fn unknown_response(body: &str) -> Self {
        Self::new(
            SmsFailureKind::UnknownResponse,
            UNKNOWN_RESPONSE_CODE,
            LocalizedText::new(
                format!("Unexpected response from gateway: {}", body.trim()),
                "استجابة غير متوقعة من خادم الرسائل",
            ),
        )
    }

    /// Local validation failure, reported under the gateway code it would have produced
    pub fn validation(error: &SmsValidationError) -> Self {
        let (kind, code) = match error {
            SmsValidationError::EmptyRecipient | SmsValidationError::InvalidRecipient { .. } => {
                (SmsFailureKind::InvalidRecipient, "-111")
            }
            SmsValidationError::EmptySender | SmsValidationError::SenderTooLong { .. } => {
                (SmsFailureKind::InvalidSender, "-116")
            }
            SmsValidationError::EmptyMessage | SmsValidationError::MessageTooLong { .. } => {
                (SmsFailureKind::InvalidMessage, "-100")
            }
        };
        Self::new(kind, code, split_bilingual(&error.to_string()))
    }

    pub fn message(&self, lang: Language) -> &str {
        match lang {
            Language::English => &self.message_en,
            Language::Arabic => &self.message_ar,
        }
    }

    pub fn is_transport_failure(&self) -> bool {
        self.kind == SmsFailureKind::TransportFailure
    }
}

impl From<SmsValidationError> for SmsFailure {
    fn from(error: SmsValidationError) -> Self {
        Self::validation(&error)
    }
}

fn split_bilingual(text: &str) -> LocalizedText {
    match text.split_once(" | ") {
        Some((en, ar)) => LocalizedText::new(en.trim(), ar.trim()),
        None => LocalizedText::new(text, text),
    }
}

/// Successful send
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendReceipt {
    /// Gateway message id
    pub sms_id: String,
    /// Recipient as echoed by the gateway
    pub mobile: String,
    /// Number of SMS parts the message was split into
    pub parts: usize,
}

/// Body returned by the pass-through endpoints
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PassThroughBody {
    Json(Value),
    Text(String),
}

impl PassThroughBody {
    /// Parse as JSON, keeping the raw text when it is not JSON
    pub fn from_body(body: String) -> Self {
        match serde_json::from_str(&body) {
            Ok(value) => PassThroughBody::Json(value),
            Err(_) => PassThroughBody::Text(body),
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            PassThroughBody::Json(value) => Some(value),
            PassThroughBody::Text(_) => None,
        }
    }
}

/// Decode a `sendsms` body into `(sms_id, mobile)`
///
/// `"<code>:<id>:<mobile>"` with code `1` or `999` is a success. Any other
/// leading code, a bare negative code or `u` is looked up in the error table.
pub fn decode_send_body(body: &str) -> Result<(String, String), SmsFailure> {
    let parts: Vec<&str> = body.split(':').collect();

    if parts.len() >= 3 {
        let code = parts[0].trim();
        return match code {
            "1" | "999" => Ok((parts[1].trim().to_string(), parts[2].trim().to_string())),
            _ => Err(SmsFailure::gateway(code)),
        };
    }

    let code = body.trim();
    if code.starts_with('-') || code == "u" {
        Err(SmsFailure::gateway(code))
    } else {
        Err(SmsFailure::unknown_response(body))
    }
}

/// Decode a `chk_balance` body
pub fn decode_balance_body(body: &str) -> Result<f64, SmsFailure> {
    let trimmed = body.trim();
    if trimmed.starts_with('-') {
        return Err(SmsFailure::gateway(trimmed));
    }
    match trimmed.parse::<f64>() {
        Ok(balance) if balance.is_finite() => Ok(balance),
        _ => Err(SmsFailure::unknown_response(body)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_send_success() {
        let (id, mobile) = decode_send_body("1:abc123:972592106099").unwrap();
        assert_eq!(id, "abc123");
        assert_eq!(mobile, "972592106099");

        let (id, mobile) = decode_send_body("999: id-7 : 972599000000 :extra\n").unwrap();
        assert_eq!(id, "id-7");
        assert_eq!(mobile, "972599000000");
    }

    #[test]
    fn test_decode_send_bare_error_code() {
        let failure = decode_send_body("-111").unwrap_err();
        assert_eq!(failure.kind, SmsFailureKind::GatewayError);
        assert_eq!(failure.code, "-111");
        assert_eq!(failure.message_en, "Invalid mobile number");
        assert_eq!(failure.message_ar, "رقم الجوال غير صحيح");
    }

    #[test]
    fn test_decode_send_colon_error_code() {
        let failure = decode_send_body("-113:0:972592106099").unwrap_err();
        assert_eq!(failure.code, "-113");
        assert_eq!(failure.kind, SmsFailureKind::GatewayError);
    }

    #[test]
    fn test_decode_send_unknown_status() {
        let failure = decode_send_body(" u\n").unwrap_err();
        assert_eq!(failure.code, "u");
        assert_eq!(failure.message_en, "Unknown status");
    }

    #[test]
    fn test_decode_send_unrecognised_negative_code() {
        let failure = decode_send_body("-7").unwrap_err();
        assert_eq!(failure.kind, SmsFailureKind::GatewayError);
        assert_eq!(failure.message_en, "Unknown error: -7");
    }

    #[test]
    fn test_decode_send_unknown_shape() {
        for body in ["xyz", "1:only-two", ""] {
            let failure = decode_send_body(body).unwrap_err();
            assert_eq!(failure.kind, SmsFailureKind::UnknownResponse, "body {body:?}");
        }
    }

    #[test]
    fn test_decode_balance() {
        assert_eq!(decode_balance_body("152.5\n").unwrap(), 152.5);
        assert_eq!(decode_balance_body("0").unwrap(), 0.0);
        assert_eq!(decode_balance_body("-110").unwrap_err().code, "-110");
        assert_eq!(
            decode_balance_body("balance").unwrap_err().kind,
            SmsFailureKind::UnknownResponse
        );
        assert_eq!(
            decode_balance_body("NaN").unwrap_err().kind,
            SmsFailureKind::UnknownResponse
        );
    }

    #[test]
    fn test_validation_failures_map_to_codes() {
        let failure = SmsFailure::from(SmsValidationError::InvalidRecipient {
            phone: "123".to_string(),
        });
        assert_eq!(failure.code, "-111");
        assert_eq!(failure.kind, SmsFailureKind::InvalidRecipient);
        assert_eq!(failure.message_en, "Invalid mobile number: 123");
        assert_eq!(failure.message(Language::Arabic), "رقم الجوال غير صحيح: 123");

        assert_eq!(SmsFailure::from(SmsValidationError::EmptySender).code, "-116");
        assert_eq!(SmsFailure::from(SmsValidationError::EmptyMessage).code, "-100");
    }

    #[test]
    fn test_transport_failure() {
        let failure = SmsFailure::connection_failed();
        assert_eq!(failure.code, "-999");
        assert!(failure.is_transport_failure());
        assert_eq!(failure.message_en, "Server connection failed");
        assert_eq!(failure.message_ar, "فشل الاتصال بالخادم");
    }

    #[test]
    fn test_pass_through_body() {
        let json = PassThroughBody::from_body(r#"{"status":"delivered"}"#.to_string());
        assert_eq!(json.as_json().and_then(|v| v["status"].as_str()), Some("delivered"));

        let text = PassThroughBody::from_body("no records".to_string());
        assert_eq!(text, PassThroughBody::Text("no records".to_string()));
    }
}
