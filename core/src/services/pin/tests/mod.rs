//! Tests for the PIN guard services

#[cfg(test)]
mod guard_tests;
