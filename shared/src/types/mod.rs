//! Type definitions shared across crates
//!
//! - `language` - Internationalization and language types

pub mod language;

pub use language::{Language, LocalizedText};
