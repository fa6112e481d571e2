//! Concurrency-control protocol tags
//!
//! Identifies which of the three multi-version protocols governs a version.
//! Used for logging and introspection; dispatch itself is static.

use serde::{Deserialize, Serialize};

/// The three multi-version concurrency-control protocols
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Protocol {
    /// Multi-version timestamp ordering
    ///
    /// Tracks the latest reader; writers older than that reader abort.
    TimestampOrdering,

    /// Multi-version optimistic concurrency control
    ///
    /// No read bookkeeping; conflicts surface when the commit id validates.
    Optimistic,

    /// Multi-version two-phase locking
    ///
    /// Shared read count and exclusive holder, mutually exclusive.
    TwoPhaseLocking,
}

impl Protocol {
    /// All protocols (for iteration)
    pub const ALL: [Protocol; 3] = [
        Protocol::TimestampOrdering,
        Protocol::Optimistic,
        Protocol::TwoPhaseLocking,
    ];

    /// Human-readable display name
    pub const fn name(&self) -> &'static str {
        match self {
            Protocol::TimestampOrdering => "MVTO",
            Protocol::Optimistic => "MVOCC",
            Protocol::TwoPhaseLocking => "MV2PL",
        }
    }

    /// Short identifier (for configuration files)
    pub const fn id(&self) -> &'static str {
        match self {
            Protocol::TimestampOrdering => "to",
            Protocol::Optimistic => "occ",
            Protocol::TwoPhaseLocking => "2pl",
        }
    }

    /// Parse from short identifier
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "to" => Some(Protocol::TimestampOrdering),
            "occ" => Some(Protocol::Optimistic),
            "2pl" => Some(Protocol::TwoPhaseLocking),
            _ => None,
        }
    }

    /// Whether reads leave a trace on the version
    ///
    /// TO raises a read watermark and 2PL counts readers; OCC reads are free.
    pub const fn tracks_reads(&self) -> bool {
        match self {
            Protocol::TimestampOrdering => true,
            Protocol::Optimistic => false,
            Protocol::TwoPhaseLocking => true,
        }
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
