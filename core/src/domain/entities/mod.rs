//! Domain entities representing core business objects.

pub mod pin;

// Re-export commonly used types
pub use pin::{
    classify_strength, is_well_formed, sanitize_pin_input, validate_pin, Pin, PinStrength,
    PIN_LENGTH, SEQUENTIAL_PINS,
};
