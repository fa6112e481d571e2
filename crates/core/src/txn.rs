//! Transaction identifiers and their allocator
//!
//! Every transaction is identified by a [`TxnId`] drawn from a
//! [`TransactionIdAllocator`]. Ids are dense, strictly increasing and never
//! reused for the lifetime of the allocator, which gives all transactions a
//! total order.
//!
//! Two values of the id space are reserved:
//! - [`INVALID_TXN_ID`] (`0`): "no transaction". Used as the unlocked value
//!   of a version's holder field, so the allocator never issues it.
//! - [`MAX_TXN_ID`] (`u64::MAX`): the open end of a visibility window, and
//!   the begin value of a tombstoned version.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Transaction identifier
pub type TxnId = u64;

/// Reserved id meaning "no transaction holds this version"
pub const INVALID_TXN_ID: TxnId = 0;

/// Sentinel for an open-ended visibility window and for tombstones
pub const MAX_TXN_ID: TxnId = TxnId::MAX;

/// Issues unique, monotonically increasing transaction ids
///
/// The allocator is an explicit object rather than a process global: build
/// one per database (or per test) and share it by reference or `Arc`.
///
/// # Thread Safety
///
/// `next()` is a single `fetch_add`, so concurrent callers never observe the
/// same id and ids handed out are strictly increasing in linearization order.
///
/// # Example
///
/// ```
/// use tuplecc_core::TransactionIdAllocator;
///
/// let ids = TransactionIdAllocator::new();
/// assert_eq!(ids.next(), 1);
/// assert_eq!(ids.next(), 2);
/// assert_eq!(ids.current(), 2);
/// ```
#[derive(Debug, Default)]
pub struct TransactionIdAllocator {
    /// Last id handed out (0 before the first call to `next`)
    last: AtomicU64,
}

impl TransactionIdAllocator {
    /// Create an allocator whose first id is 1
    pub fn new() -> Self {
        Self::with_start(INVALID_TXN_ID)
    }

    /// Create an allocator that resumes after `last_issued`
    ///
    /// The next call to [`next`](Self::next) returns `last_issued + 1`.
    pub fn with_start(last_issued: TxnId) -> Self {
        TransactionIdAllocator {
            last: AtomicU64::new(last_issued),
        }
    }

    /// Allocate the next transaction id
    #[inline]
    pub fn next(&self) -> TxnId {
        self.last.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Last id handed out, or 0 if none
    #[inline]
    pub fn current(&self) -> TxnId {
        self.last.load(Ordering::Acquire)
    }

    /// Begin a transaction with a freshly allocated id
    pub fn begin(&self) -> Transaction {
        Transaction { id: self.next() }
    }
}

/// Handle for a running transaction
///
/// A transaction holds exactly one id at a time. OCC and other two-timestamp
/// protocols call [`reassign`](Self::reassign) to obtain a later commit id
/// once the read phase is over; the start id is then gone from the handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Transaction {
    id: TxnId,
}

impl Transaction {
    /// Begin a transaction, allocating its id from `ids`
    pub fn new(ids: &TransactionIdAllocator) -> Self {
        ids.begin()
    }

    /// Wrap an already-issued id
    ///
    /// The caller is responsible for the id having come from an allocator.
    pub const fn with_id(id: TxnId) -> Self {
        Transaction { id }
    }

    /// Current id of this transaction
    #[inline]
    pub const fn id(&self) -> TxnId {
        self.id
    }

    /// Replace this transaction's id with a newly allocated one
    ///
    /// Returns the new id. Used to model a commit timestamp distinct from the
    /// start timestamp.
    pub fn reassign(&mut self, ids: &TransactionIdAllocator) -> TxnId {
        self.id = ids.next();
        self.id
    }
}

impl std::fmt::Display for Transaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "T{}", self.id)
    }
}
