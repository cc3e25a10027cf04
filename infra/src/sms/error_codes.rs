//! TweetSMS result codes and their bilingual messages

use bp_shared::types::LocalizedText;
use serde::Serialize;

/// A gateway result code with its English and Arabic message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GatewayErrorMessage {
    pub code: &'static str,
    pub en: &'static str,
    pub ar: &'static str,
}

/// Known gateway result codes
pub static GATEWAY_ERRORS: &[GatewayErrorMessage] = &[
    GatewayErrorMessage {
        code: "-100",
        en: "Missing parameters",
        ar: "لم يتم إدخال جميع البيانات المطلوبة",
    },
    GatewayErrorMessage {
        code: "-110",
        en: "Wrong username or password",
        ar: "اسم المستخدم أو كلمة المرور غير صحيحة",
    },
    GatewayErrorMessage {
        code: "-111",
        en: "Invalid mobile number",
        ar: "رقم الجوال غير صحيح",
    },
    GatewayErrorMessage {
        code: "-112",
        en: "Mobile number already exists",
        ar: "رقم الجوال مكرر",
    },
    GatewayErrorMessage {
        code: "-113",
        en: "Insufficient balance or invalid ID",
        ar: "الرصيد غير كافٍ أو المعرف غير صحيح",
    },
    GatewayErrorMessage {
        code: "-114",
        en: "Group name already exists",
        ar: "اسم المجموعة موجود مسبقاً",
    },
    GatewayErrorMessage {
        code: "-115",
        en: "Sender name not available",
        ar: "اسم المرسل غير متاح",
    },
    GatewayErrorMessage {
        code: "-116",
        en: "Invalid sender name",
        ar: "اسم المرسل غير صالح",
    },
    GatewayErrorMessage {
        code: "-2",
        en: "Invalid destination or unsupported country",
        ar: "رقم الوجهة غير صحيح أو الدولة غير مدعومة",
    },
    GatewayErrorMessage {
        code: "-999",
        en: "Failed to send by the SMS provider",
        ar: "فشل الإرسال من قبل مزود الخدمة",
    },
    GatewayErrorMessage {
        code: "u",
        en: "Unknown status",
        ar: "حالة غير معروفة",
    },
];

/// Look up a result code in the gateway table
pub fn lookup_gateway_error(code: &str) -> Option<&'static GatewayErrorMessage> {
    let code = code.trim();
    GATEWAY_ERRORS.iter().find(|entry| entry.code == code)
}

/// Message pair for a result code, with a generic fallback for unknown codes
pub fn describe_gateway_error(code: &str) -> LocalizedText {
    match lookup_gateway_error(code) {
        Some(entry) => LocalizedText::new(entry.en, entry.ar),
        None => {
            let code = code.trim();
            LocalizedText::new(
                format!("Unknown error: {}", code),
                format!("خطأ غير معروف: {}", code),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bp_shared::Language;

    #[test]
    fn test_known_codes() {
        for code in [
            "-100", "-110", "-111", "-112", "-113", "-114", "-115", "-116", "-2", "-999", "u",
        ] {
            assert!(lookup_gateway_error(code).is_some(), "missing {code}");
        }
        assert_eq!(lookup_gateway_error(" -111 ").map(|e| e.en), Some("Invalid mobile number"));
    }

    #[test]
    fn test_codes_are_unique() {
        let mut codes: Vec<_> = GATEWAY_ERRORS.iter().map(|e| e.code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), GATEWAY_ERRORS.len());
    }

    #[test]
    fn test_unknown_code_fallback() {
        let text = describe_gateway_error("-42");
        assert_eq!(text.get(Language::English), "Unknown error: -42");
        assert_eq!(text.get(Language::Arabic), "خطأ غير معروف: -42");
    }
}
