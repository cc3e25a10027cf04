//! PIN value object and strength heuristics.

use std::fmt;

use bp_shared::types::Language;
use serde::Serialize;

use crate::errors::PinError;

/// Number of digits in a PIN
pub const PIN_LENGTH: usize = 6;

/// Sequences rejected outright as trivially guessable
pub const SEQUENTIAL_PINS: [&str; 2] = ["123456", "654321"];

/// Leading run of one digit that makes a PIN "weak"
const WEAK_LEADING_RUN: usize = 4;

/// A well-formed 6-digit PIN
///
/// `Debug` output is masked so a PIN never ends up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Pin(String);

impl Pin {
    /// Accept any well-formed PIN (verification flow)
    pub fn parse(raw: &str) -> Result<Self, PinError> {
        if !is_well_formed(raw) {
            return Err(PinError::InvalidFormat);
        }
        Ok(Self(raw.to_string()))
    }

    /// Accept only PINs that pass the strength rules (creation flow)
    pub fn new_strong(raw: &str) -> Result<Self, PinError> {
        validate_pin(raw)?;
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pin(******)")
    }
}

impl AsRef<str> for Pin {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Keep only ASCII digits from raw input, capped at [`PIN_LENGTH`]
pub fn sanitize_pin_input(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit())
        .take(PIN_LENGTH)
        .collect()
}

/// Exactly six ASCII digits
pub fn is_well_formed(raw: &str) -> bool {
    raw.len() == PIN_LENGTH && raw.bytes().all(|b| b.is_ascii_digit())
}

fn all_same_digit(raw: &str) -> bool {
    let mut bytes = raw.bytes();
    match bytes.next() {
        Some(first) => bytes.all(|b| b == first),
        None => false,
    }
}

/// Validate a candidate PIN for creation
///
/// Checks run in order: format, all-identical digits, sequential pattern.
pub fn validate_pin(raw: &str) -> Result<(), PinError> {
    if !is_well_formed(raw) {
        return Err(PinError::InvalidFormat);
    }
    if all_same_digit(raw) {
        return Err(PinError::TooWeak);
    }
    if SEQUENTIAL_PINS.contains(&raw) {
        return Err(PinError::TooWeak);
    }
    Ok(())
}

/// Advisory strength rating shown while the user types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PinStrength {
    /// Input is not yet a complete PIN
    Unrated,
    VeryWeak,
    Weak,
    Good,
}

impl PinStrength {
    pub fn label(&self, lang: Language) -> &'static str {
        match (self, lang) {
            (PinStrength::Unrated, _) => "",
            (PinStrength::VeryWeak, Language::English) => "Very weak",
            (PinStrength::VeryWeak, Language::Arabic) => "ضعيف جداً",
            (PinStrength::Weak, Language::English) => "Weak",
            (PinStrength::Weak, Language::Arabic) => "ضعيف",
            (PinStrength::Good, Language::English) => "Good",
            (PinStrength::Good, Language::Arabic) => "جيد",
        }
    }
}

/// Rate a (possibly partial) PIN
///
/// Display only: creation is gated by [`validate_pin`], not by this rating.
pub fn classify_strength(raw: &str) -> PinStrength {
    if !is_well_formed(raw) {
        return PinStrength::Unrated;
    }
    if all_same_digit(raw) || SEQUENTIAL_PINS.contains(&raw) {
        return PinStrength::VeryWeak;
    }
    if all_same_digit(&raw[..WEAK_LEADING_RUN]) {
        return PinStrength::Weak;
    }
    PinStrength::Good
}
