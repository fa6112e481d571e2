//! The capability set every protocol exposes
//!
//! [`ConcurrencyControl`] is implemented by exactly three types:
//! [`Mvto`](crate::Mvto), [`Mvocc`](crate::Mvocc) and [`Mv2pl`](crate::Mv2pl).
//! Tuples and relations are generic over it, so the protocol is fixed at
//! compile time and calls are statically dispatched.
//!
//! Every operation is non-blocking: it either succeeds immediately or
//! returns `false`. Retrying, aborting or escalating is the caller's call.

use crate::window::VersionWindow;
use std::fmt::Debug;
use tuplecc_core::{Protocol, Transaction, TxnId};

/// Per-version concurrency-control state
pub trait ConcurrencyControl: Debug + Send + Sync + Sized + 'static {
    /// Protocol implemented by this state
    const PROTOCOL: Protocol;

    /// State for a version created by `creator`
    ///
    /// The version is born held by its creator with window
    /// `[creator, MAX_TXN_ID)`.
    fn new(creator: &Transaction) -> Self;

    /// The embedded holder/begin/end record
    fn window(&self) -> &VersionWindow;

    /// Try to take exclusive access for `txn`
    fn try_lock(&self, txn: &Transaction) -> bool;

    /// Record that `txn` reads this version
    fn read(&self, txn: &Transaction) -> bool;

    /// Whether this version is visible to `txn`
    fn is_valid(&self, txn: &Transaction) -> bool;

    /// Clear the holder
    ///
    /// The caller must be the current holder; this is not re-verified.
    fn unlock(&self) {
        self.window().release();
    }

    /// Clear the holder only if `txn` still holds it
    fn unlock_as(&self, txn: &Transaction) -> bool {
        let released = self.window().release_if_held(txn.id());
        if !released {
            tracing::warn!(
                protocol = %Self::PROTOCOL,
                txn = txn.id(),
                holder = self.holder(),
                "unlock by non-holder ignored"
            );
        }
        released
    }

    /// Close the visibility window at `txn`
    ///
    /// Requires `txn` to hold the version; returns `false` otherwise.
    fn retire(&self, txn: &Transaction) -> bool {
        let retired = self.window().retire(txn.id());
        if !retired {
            tracing::trace!(
                protocol = %Self::PROTOCOL,
                txn = txn.id(),
                holder = self.holder(),
                "retire refused: caller is not the holder"
            );
        }
        retired
    }

    /// Tombstone this version for every current and future transaction
    fn delete(&self, txn: &Transaction) {
        self.window().tombstone();
        tracing::debug!(protocol = %Self::PROTOCOL, txn = txn.id(), "version tombstoned");
    }

    /// Current holder, or 0 if unlocked
    fn holder(&self) -> TxnId {
        self.window().holder()
    }

    /// Window begin
    fn begin(&self) -> TxnId {
        self.window().begin()
    }

    /// Window end
    fn end(&self) -> TxnId {
        self.window().end()
    }

    /// Whether a transaction holds this version
    fn is_locked(&self) -> bool {
        self.window().is_locked()
    }

    /// Whether a successor has closed this version's window
    fn is_retired(&self) -> bool {
        self.window().is_retired()
    }

    /// Whether this version has been tombstoned
    fn is_deleted(&self) -> bool {
        self.window().is_deleted()
    }
}
