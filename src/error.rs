//! Unified error types for tuplecc.
//!
//! This module provides a single error type that wraps the crate-level
//! errors and presents a consistent interface to users.

use thiserror::Error;
use tuplecc_core::CcError;
use tuplecc_storage::RelationError;

/// All tuplecc errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Concurrency control refused the operation (lock conflict, stale
    /// visibility, blocked read, retire without the lock)
    #[error("conflict: {0}")]
    Conflict(#[from] CcError),

    /// No version at the requested position
    #[error("position {position} out of bounds (len {len})")]
    OutOfBounds {
        /// Requested position
        position: usize,
        /// Relation length at the time
        len: usize,
    },

    /// Configuration could not be parsed or is out of range
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type for tuplecc operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is retryable.
    ///
    /// Race outcomes may succeed on retry with a fresh transaction; caller
    /// misuse and configuration errors will not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Conflict(e) => e.is_retryable(),
            _ => false,
        }
    }

    /// Check if this is a conflict error.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::Conflict(_))
    }

    /// Check if this error reports misuse of the protocol API.
    pub fn is_misuse(&self) -> bool {
        matches!(self, Error::Conflict(e) if e.is_misuse())
    }
}

impl From<RelationError> for Error {
    fn from(e: RelationError) -> Self {
        match e {
            RelationError::OutOfBounds { position, len } => Error::OutOfBounds { position, len },
            RelationError::Cc(cc) => Error::Conflict(cc),
            RelationError::InvalidConfig(msg) => Error::InvalidConfig(msg),
        }
    }
}
