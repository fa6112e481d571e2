//! Convenient imports for tuplecc.
//!
//! ```
//! use tuplecc::prelude::*;
//!
//! let ids = TransactionIdAllocator::new();
//! let relation: Relation<u64, Mv2pl> = Relation::new();
//! let pos = relation.insert(VersionedTuple::new(&ids.begin(), 1));
//! assert!(relation.get(pos).unwrap().cc().read(&ids.begin()));
//! ```

// Main entry point
pub use crate::builder::RelationBuilder;

// Error handling
pub use crate::error::{Error, Result};

// Transactions
pub use tuplecc_core::{Transaction, TransactionIdAllocator, TxnId, MAX_TXN_ID};

// Protocols
pub use tuplecc_concurrency::{ConcurrencyControl, Mv2pl, Mvocc, Mvto};

// Storage
pub use tuplecc_storage::{Relation, RelationConfig, VersionedTuple};
