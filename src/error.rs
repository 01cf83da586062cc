//! Error types.
//!
//! There is a single error kind: an argument outside an operation's domain,
//! detected at the point of use rather than validated in advance. Failures
//! inside wrapped callbacks are never captured into this type; they
//! propagate to the caller unmodified, with no retry or fallback.

use thiserror::Error;

/// An error from a rewrap operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An argument was outside the operation's domain.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
