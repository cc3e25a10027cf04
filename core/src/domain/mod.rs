//! Domain layer containing the PIN value object and its rules.

pub mod entities;
