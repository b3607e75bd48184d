//! # Error Types
//!
//! Errors raised while parsing ledger primitives.

use thiserror::Error;

/// Errors from parsing or constructing primitive values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrimitiveError {
    /// Input was not valid hexadecimal.
    #[error("Invalid hex encoding: {0}")]
    InvalidHex(String),

    /// Decoded byte length did not match the expected width.
    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Distinguished name could not be parsed.
    #[error("Invalid legal name '{name}': {reason}")]
    InvalidLegalName { name: String, reason: String },
}
