//! Append-only relation of versioned tuples
//!
//! # Design
//!
//! - Positions are permanent: a position returned by [`Relation::insert`]
//!   names the same version for the lifetime of the relation. Nothing is ever
//!   removed or compacted; retired and tombstoned versions stay in place.
//! - The structural lock only guards growth of the backing vector. It is
//!   held for the push (and the publish of the new version) and for the
//!   pointer copy in [`Relation::get`], never while a caller works on a
//!   version's concurrency-control state.
//! - Versions are shared through `Arc`, so a handle returned by `get` stays
//!   valid however much the relation grows afterwards.
//!
//! # Write Path
//!
//! ```text
//! is_valid(T) -> try_lock(T) -> head check -> successor(T, old) -> insert -> retire(T) -> unlock
//! ```
//!
//! Only the chain head (a version whose end is still open) may be
//! superseded or deleted. The head check runs while the lock is held, so an
//! older transaction arriving after a younger one has retired the version
//! is refused instead of forking the chain.
//!
//! [`Relation::update_version`] runs this sequence for any protocol. It is
//! a convenience over the raw per-version calls, which remain available
//! through [`Relation::get`].

use crate::config::RelationConfig;
use crate::error::{RelationError, Result};
use crate::tuple::VersionedTuple;
use parking_lot::RwLock;
use std::sync::Arc;
use tuplecc_concurrency::ConcurrencyControl;
use tuplecc_core::{CcError, Transaction, MAX_TXN_ID};

/// Shared handle to a version stored in a relation
pub type TupleRef<P, C> = Arc<VersionedTuple<P, C>>;

/// Append-only, position-stable sequence of versions
///
/// # Example
///
/// ```
/// use tuplecc_concurrency::{ConcurrencyControl, Mvto};
/// use tuplecc_core::TransactionIdAllocator;
/// use tuplecc_storage::{Relation, VersionedTuple};
///
/// let ids = TransactionIdAllocator::new();
/// let relation: Relation<u32, Mvto> = Relation::new();
///
/// let t1 = ids.begin();
/// let pos = relation.insert(VersionedTuple::new(&t1, 7));
///
/// let t2 = ids.begin();
/// let version = relation.get(pos).unwrap();
/// assert!(version.cc().is_valid(&t2));
/// assert_eq!(*version.payload(), 7);
/// ```
#[derive(Debug)]
pub struct Relation<P, C: ConcurrencyControl> {
    versions: RwLock<Vec<TupleRef<P, C>>>,
}

impl<P, C: ConcurrencyControl> Relation<P, C> {
    /// Create an empty relation
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty relation with room for `capacity` versions
    pub fn with_capacity(capacity: usize) -> Self {
        Relation {
            versions: RwLock::new(Vec::with_capacity(capacity)),
        }
    }

    /// Create an empty relation from validated settings
    pub fn with_config(config: &RelationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_capacity(config.initial_capacity))
    }

    /// Append a version and publish it
    ///
    /// The version's creator hold is released while the structural lock is
    /// still held, so no other thread ever observes it locked by its creator.
    /// Returns the version's permanent position.
    pub fn insert(&self, tuple: VersionedTuple<P, C>) -> usize {
        let begin = tuple.cc().begin();
        let mut versions = self.versions.write();
        let position = versions.len();
        versions.push(Arc::new(tuple));
        versions[position].cc().unlock();
        drop(versions);

        tracing::debug!(protocol = %C::PROTOCOL, position, begin, "version inserted");
        position
    }

    /// Version at `position`, if one has been inserted there
    pub fn get(&self, position: usize) -> Option<TupleRef<P, C>> {
        self.versions.read().get(position).cloned()
    }

    /// Version at `position`, or an out-of-bounds error
    pub fn try_get(&self, position: usize) -> Result<TupleRef<P, C>> {
        let versions = self.versions.read();
        versions
            .get(position)
            .cloned()
            .ok_or(RelationError::OutOfBounds {
                position,
                len: versions.len(),
            })
    }

    /// Number of versions ever inserted
    pub fn len(&self) -> usize {
        self.versions.read().len()
    }

    /// Whether nothing has been inserted yet
    pub fn is_empty(&self) -> bool {
        self.versions.read().is_empty()
    }

    /// Slots available before the backing storage reallocates
    pub fn capacity(&self) -> usize {
        self.versions.read().capacity()
    }

    /// Positions whose version is visible to `txn`
    ///
    /// A pure visibility scan: no read is recorded on any version.
    pub fn visible_positions(&self, txn: &Transaction) -> Vec<usize> {
        self.versions
            .read()
            .iter()
            .enumerate()
            .filter(|(_, version)| version.cc().is_valid(txn))
            .map(|(position, _)| position)
            .collect()
    }

    /// Visibility check followed by a protocol read
    ///
    /// Returns a copy of the payload. Under MV2PL a successful call leaves a
    /// shared lock on the version that the caller must release with
    /// `unlock_read`.
    pub fn checked_read(&self, txn: &Transaction, position: usize) -> Result<P>
    where
        P: Clone,
    {
        let version = self.try_get(position)?;
        let cc = version.cc();
        if !cc.is_valid(txn) {
            return Err(stale(txn, cc).into());
        }
        if !cc.read(txn) {
            return Err(CcError::ReadBlocked {
                txn: txn.id(),
                holder: cc.holder(),
            }
            .into());
        }
        Ok(version.payload().clone())
    }

    /// Install a successor of the version at `position` on behalf of `txn`
    ///
    /// Locks the current version, inserts a copy modified by `mutate`,
    /// retires the current version at `txn` and releases it. Returns the
    /// successor's position. If the lock cannot be taken, or the version has
    /// already been superseded, nothing is inserted.
    ///
    /// The successor is published before the retire. If another thread
    /// force-releases the lock in between, the call fails with
    /// `RetireMismatch` and the successor stays in the relation with an open
    /// window.
    ///
    /// Under MVOCC `txn` should already carry its commit id. Under MV2PL the
    /// caller must not hold a shared lock on the version.
    pub fn update_version<F>(&self, txn: &Transaction, position: usize, mutate: F) -> Result<usize>
    where
        P: Clone,
        F: FnOnce(&mut P),
    {
        let current = self.try_get(position)?;
        let cc = current.cc();

        if !cc.is_valid(txn) {
            return Err(stale(txn, cc).into());
        }
        if !cc.try_lock(txn) {
            return Err(CcError::LockConflict {
                txn: txn.id(),
                holder: cc.holder(),
            }
            .into());
        }
        lock_head(txn, cc)?;

        let mut next = VersionedTuple::successor(txn, &current);
        mutate(next.payload_mut());
        let next_position = self.insert(next);

        if !cc.retire(txn) {
            let holder = cc.holder();
            tracing::warn!(txn = txn.id(), holder, position, "lost lock before retire");
            return Err(CcError::RetireMismatch {
                txn: txn.id(),
                holder,
            }
            .into());
        }
        cc.unlock_as(txn);

        tracing::debug!(
            protocol = %C::PROTOCOL,
            txn = txn.id(),
            from = position,
            to = next_position,
            "version superseded"
        );
        Ok(next_position)
    }

    /// Tombstone the version at `position` on behalf of `txn`
    ///
    /// Takes the version's lock for the duration of the delete so it cannot
    /// race a concurrent update.
    pub fn delete_version(&self, txn: &Transaction, position: usize) -> Result<()> {
        let current = self.try_get(position)?;
        let cc = current.cc();

        if !cc.is_valid(txn) {
            return Err(stale(txn, cc).into());
        }
        if !cc.try_lock(txn) {
            return Err(CcError::LockConflict {
                txn: txn.id(),
                holder: cc.holder(),
            }
            .into());
        }
        lock_head(txn, cc)?;
        cc.delete(txn);
        cc.unlock_as(txn);
        Ok(())
    }
}

impl<P, C: ConcurrencyControl> Default for Relation<P, C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Confirm a version locked by `txn` is still the head of its chain
///
/// On failure the lock is given back. A holder mismatch here means the lock
/// was force-released after `try_lock`; nothing has been written yet.
fn lock_head<C: ConcurrencyControl>(
    txn: &Transaction,
    cc: &C,
) -> std::result::Result<(), CcError> {
    let holder = cc.holder();
    if holder != txn.id() {
        return Err(CcError::RetireMismatch {
            txn: txn.id(),
            holder,
        });
    }
    if cc.end() != MAX_TXN_ID || cc.is_deleted() {
        let err = stale(txn, cc);
        cc.unlock_as(txn);
        tracing::debug!(txn = txn.id(), end = cc.end(), "version already superseded");
        return Err(err);
    }
    Ok(())
}

fn stale<C: ConcurrencyControl>(txn: &Transaction, cc: &C) -> CcError {
    CcError::StaleVisibility {
        txn: txn.id(),
        begin: cc.begin(),
        end: cc.end(),
    }
}
