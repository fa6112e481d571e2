//! Relation error types

use thiserror::Error;
use tuplecc_core::CcError;

/// Errors raised by relation operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelationError {
    /// No version has been inserted at this position
    #[error("position {position} out of bounds (len {len})")]
    OutOfBounds {
        /// Requested position
        position: usize,
        /// Relation length at the time of the request
        len: usize,
    },

    /// Concurrency control refused the operation
    #[error(transparent)]
    Cc(#[from] CcError),

    /// Configuration could not be parsed or is out of range
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl RelationError {
    /// Check if retrying with a fresh transaction may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            RelationError::Cc(e) => e.is_retryable(),
            _ => false,
        }
    }
}

/// Result type for relation operations
pub type Result<T> = std::result::Result<T, RelationError>;
