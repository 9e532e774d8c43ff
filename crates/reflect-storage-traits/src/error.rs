//! Error types for identifier parsing

use thiserror::Error;

/// Error returned when parsing one of the protocol identifiers fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    /// Identity string has the wrong length
    #[error("identity must be 8 characters, got {0}")]
    InvalidIdentityLength(usize),

    /// Identity string contains a character outside `[A-Z0-9*]`
    #[error("identity contains invalid character {0:?}")]
    InvalidIdentityCharacter(char),

    /// Hex encoded identifier could not be decoded
    #[error("invalid hex: {0}")]
    Hex(String),

    /// Decoded identifier has the wrong length
    #[error("expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Expected number of bytes
        expected: usize,
        /// Actual number of bytes
        actual: usize,
    },
}

impl From<hex::FromHexError> for IdError {
    fn from(e: hex::FromHexError) -> Self {
        Self::Hex(e.to_string())
    }
}
