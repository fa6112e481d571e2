//! Concurrency-control error types
//!
//! The per-version primitives report failure as `false`. Higher-level paths
//! that need to say *why* an operation failed (the relation's write path,
//! checked reads) map those outcomes onto [`CcError`].

use crate::txn::TxnId;
use thiserror::Error;

/// Why a concurrency-control operation was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CcError {
    /// Another transaction holds the version, or a concurrent reader or
    /// writer invalidated the claim right after it was taken
    #[error("lock conflict: txn {txn} could not lock version held by {holder}")]
    LockConflict {
        /// Transaction that attempted the lock
        txn: TxnId,
        /// Holder observed when the attempt failed (0 if the claim was
        /// taken and then given back)
        holder: TxnId,
    },

    /// The version is not in the transaction's visibility window
    #[error("stale visibility: txn {txn} outside window [{begin}, {end})")]
    StaleVisibility {
        /// Transaction evaluating visibility
        txn: TxnId,
        /// Window begin observed
        begin: TxnId,
        /// Window end observed
        end: TxnId,
    },

    /// Retire called by a transaction that does not hold the lock
    #[error("retire mismatch: txn {txn} does not hold version (holder {holder})")]
    RetireMismatch {
        /// Transaction that attempted to retire
        txn: TxnId,
        /// Actual holder
        holder: TxnId,
    },

    /// A 2PL read was refused because a writer holds the version
    #[error("read blocked: txn {txn} cannot read version held by {holder}")]
    ReadBlocked {
        /// Transaction that attempted to read
        txn: TxnId,
        /// Writer holding the version
        holder: TxnId,
    },
}

impl CcError {
    /// Check if this error is a race outcome that may succeed with a fresh
    /// transaction
    pub fn is_retryable(&self) -> bool {
        !self.is_misuse()
    }

    /// Check if this error reports caller misuse of the protocol
    pub fn is_misuse(&self) -> bool {
        matches!(self, CcError::RetireMismatch { .. })
    }

    /// Transaction the error was raised for
    pub fn txn(&self) -> TxnId {
        match self {
            CcError::LockConflict { txn, .. }
            | CcError::StaleVisibility { txn, .. }
            | CcError::RetireMismatch { txn, .. }
            | CcError::ReadBlocked { txn, .. } => *txn,
        }
    }
}

/// Result type for concurrency-control operations
pub type CcResult<T> = std::result::Result<T, CcError>;
