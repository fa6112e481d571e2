//! # tuplecc
//!
//! Multi-version concurrency control over an in-memory, append-only relation.
//!
//! Three interchangeable protocols decide when a transaction may see, lock,
//! supersede or tombstone a tuple version, using nothing but atomics:
//!
//! - [`Mvto`] - timestamp ordering; writers older than the latest reader abort
//! - [`Mvocc`] - optimistic; conflicts surface when a commit id validates
//! - [`Mv2pl`] - two-phase locking; readers and the writer exclude each other
//!
//! ## Quick Start
//!
//! ```
//! use tuplecc::prelude::*;
//!
//! let ids = TransactionIdAllocator::new();
//! let relation: Relation<(i32, f32, f64), Mvto> = RelationBuilder::new().build()?;
//!
//! // T1 inserts a tuple
//! let t1 = ids.begin();
//! let pos = relation.insert(VersionedTuple::new(&t1, (1, 2.0, 3.0)));
//!
//! // T2 supersedes it with a modified copy
//! let t2 = ids.begin();
//! let next = relation.update_version(&t2, pos, |row| row.1 = 3.0)?;
//!
//! // T3 sees only the new version
//! let t3 = ids.begin();
//! assert_eq!(relation.visible_positions(&t3), vec![next]);
//! # Ok::<(), tuplecc::Error>(())
//! ```
//!
//! Every primitive is non-blocking and reports failure as `false` (or an
//! [`Error`] on the convenience paths). Whether to retry with a fresh
//! transaction or abort is left to the caller.

#![warn(missing_docs)]

mod builder;
mod error;

pub mod prelude;

// Re-export main entry points
pub use builder::RelationBuilder;
pub use error::{Error, Result};

// Re-export core types
pub use tuplecc_core::{
    CcError, Protocol, Transaction, TransactionIdAllocator, TxnId, INVALID_TXN_ID, MAX_TXN_ID,
};

// Re-export protocols
pub use tuplecc_concurrency::{ConcurrencyControl, Mv2pl, Mvocc, Mvto, VersionWindow};

// Re-export storage
pub use tuplecc_storage::{Relation, RelationConfig, RelationError, TupleRef, VersionedTuple};
