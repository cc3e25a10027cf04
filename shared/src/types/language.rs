//! Language and internationalization types

use serde::{Deserialize, Serialize};

/// Language preference for user-facing messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ar")]
    Arabic,
}

impl Default for Language {
    /// The portal's audience reads Arabic first.
    fn default() -> Self {
        Language::Arabic
    }
}

impl Language {
    /// Extract language from an Accept-Language header
    pub fn from_accept_language(header: &str) -> Self {
        let header_lower = header.trim().to_lowercase();
        if header_lower.starts_with("en") {
            Language::English
        } else {
            Language::Arabic
        }
    }

    /// Get language code (ISO 639-1)
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Arabic => "ar",
        }
    }

    /// Get native language name
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Arabic => "العربية",
        }
    }

    /// Check if language uses right-to-left script
    pub fn is_rtl(&self) -> bool {
        matches!(self, Language::Arabic)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "eng" | "english" => Ok(Language::English),
            "ar" | "ara" | "arabic" | "العربية" => Ok(Language::Arabic),
            _ => Err(format!("Unsupported language: {}", s)),
        }
    }
}

/// A message carried in both supported languages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub en: String,
    pub ar: String,
}

impl LocalizedText {
    pub fn new(en: impl Into<String>, ar: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            ar: ar.into(),
        }
    }

    /// Pick the text for a language
    pub fn get(&self, lang: Language) -> &str {
        match lang {
            Language::English => &self.en,
            Language::Arabic => &self.ar,
        }
    }
}

impl std::fmt::Display for LocalizedText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} | {}", self.en, self.ar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_from_header() {
        assert_eq!(Language::from_accept_language("en-US,en;q=0.9"), Language::English);
        assert_eq!(Language::from_accept_language("ar-PS,ar;q=0.9"), Language::Arabic);
        assert_eq!(Language::from_accept_language("fr-FR"), Language::Arabic);
        assert_eq!(Language::from_accept_language("EN-gb"), Language::English);
    }

    #[test]
    fn test_language_properties() {
        let en = Language::English;
        assert_eq!(en.code(), "en");
        assert!(!en.is_rtl());

        let ar = Language::Arabic;
        assert_eq!(ar.code(), "ar");
        assert_eq!(ar.native_name(), "العربية");
        assert!(ar.is_rtl());
        assert_eq!(Language::default(), Language::Arabic);
    }

    #[test]
    fn test_language_from_str() {
        assert_eq!("en".parse::<Language>().unwrap(), Language::English);
        assert_eq!("arabic".parse::<Language>().unwrap(), Language::Arabic);
        assert!("zh".parse::<Language>().is_err());
    }

    #[test]
    fn test_localized_text() {
        let text = LocalizedText::new("Invalid mobile number", "رقم الجوال غير صحيح");
        assert_eq!(text.get(Language::English), "Invalid mobile number");
        assert_eq!(text.get(Language::Arabic), "رقم الجوال غير صحيح");
        assert_eq!(text.to_string(), "Invalid mobile number | رقم الجوال غير صحيح");
    }
}
