//! Atomic visibility window shared by every protocol
//!
//! Each version carries a holder plus the half-open interval `[begin, end)`
//! of transaction ids it is visible to. All three protocols embed one
//! [`VersionWindow`] and layer their own read bookkeeping on top.
//!
//! ## Field Semantics
//!
//! | Field  | Meaning                                           | Initial       |
//! |--------|---------------------------------------------------|---------------|
//! | holder | Transaction with exclusive access, 0 if unlocked  | creator id    |
//! | begin  | First id the version is visible to                | creator id    |
//! | end    | First id the version is no longer visible to      | `MAX_TXN_ID`  |
//!
//! Loads use `Acquire`, stores use `Release`, and compare-and-swap uses
//! `AcqRel` on success with `Acquire` on failure.

use std::sync::atomic::{AtomicU64, Ordering};
use tuplecc_core::{TxnId, INVALID_TXN_ID, MAX_TXN_ID};

/// Holder and `[begin, end)` window of one version
#[derive(Debug)]
pub struct VersionWindow {
    holder: AtomicU64,
    begin: AtomicU64,
    end: AtomicU64,
}

impl VersionWindow {
    /// Window for a version created by `creator`
    ///
    /// The version starts out held by its creator and visible from
    /// `creator` onwards with an open end.
    pub fn new(creator: TxnId) -> Self {
        VersionWindow {
            holder: AtomicU64::new(creator),
            begin: AtomicU64::new(creator),
            end: AtomicU64::new(MAX_TXN_ID),
        }
    }

    /// Current holder, or [`INVALID_TXN_ID`] if unlocked
    #[inline]
    pub fn holder(&self) -> TxnId {
        self.holder.load(Ordering::Acquire)
    }

    /// First transaction id this version is visible to
    #[inline]
    pub fn begin(&self) -> TxnId {
        self.begin.load(Ordering::Acquire)
    }

    /// First transaction id this version is no longer visible to
    #[inline]
    pub fn end(&self) -> TxnId {
        self.end.load(Ordering::Acquire)
    }

    /// `begin <= id < end`
    #[inline]
    pub fn contains(&self, id: TxnId) -> bool {
        self.begin() <= id && id < self.end()
    }

    /// Claim exclusive access for `id`
    ///
    /// Single compare-and-swap of the holder from 0 to `id`. On failure
    /// returns the holder that was observed; never retries.
    #[inline]
    pub fn claim(&self, id: TxnId) -> Result<(), TxnId> {
        debug_assert_ne!(id, INVALID_TXN_ID, "transaction id 0 is reserved");
        self.holder
            .compare_exchange(INVALID_TXN_ID, id, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| ())
    }

    /// Clear the holder unconditionally
    ///
    /// The caller must be the current holder; this is not re-verified.
    #[inline]
    pub fn release(&self) {
        self.holder.store(INVALID_TXN_ID, Ordering::Release);
    }

    /// Clear the holder only if `id` still holds it
    #[inline]
    pub fn release_if_held(&self, id: TxnId) -> bool {
        self.holder
            .compare_exchange(id, INVALID_TXN_ID, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Close the window at `id`
    ///
    /// Requires `id` to be the current holder. Returns `false` (and leaves
    /// the window untouched) otherwise.
    pub fn retire(&self, id: TxnId) -> bool {
        if self.holder() != id {
            return false;
        }
        self.end.store(id, Ordering::Release);
        true
    }

    /// Tombstone the version: begin becomes unreachable
    pub fn tombstone(&self) {
        self.begin.store(MAX_TXN_ID, Ordering::Release);
    }

    /// Whether a transaction holds the version
    #[inline]
    pub fn is_locked(&self) -> bool {
        self.holder() != INVALID_TXN_ID
    }

    /// Whether the window has been closed by a retire
    #[inline]
    pub fn is_retired(&self) -> bool {
        self.end() != MAX_TXN_ID
    }

    /// Whether the version has been tombstoned
    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.begin() == MAX_TXN_ID
    }
}
