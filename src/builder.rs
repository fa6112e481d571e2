//! Relation construction.
//!
//! [`RelationBuilder`] collects settings and builds a [`Relation`] for any
//! payload type and protocol.

use crate::error::Result;
use tuplecc_concurrency::ConcurrencyControl;
use tuplecc_storage::{Relation, RelationConfig};

/// Builder for relation configuration.
///
/// # Example
///
/// ```
/// use tuplecc::prelude::*;
///
/// // Defaults: room for 100 versions
/// let relation: Relation<u64, Mvto> = RelationBuilder::new().build()?;
///
/// // Explicit sizing
/// let relation: Relation<u64, Mv2pl> = RelationBuilder::new()
///     .initial_capacity(1024)
///     .build()?;
///
/// // From a TOML document
/// let relation: Relation<u64, Mvocc> =
///     RelationBuilder::from_toml_str("initial_capacity = 8")?.build()?;
/// # Ok::<(), tuplecc::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct RelationBuilder {
    config: RelationConfig,
}

impl RelationBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a TOML configuration document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(Self {
            config: RelationConfig::from_toml_str(s)?,
        })
    }

    /// Replace all settings.
    pub fn config(mut self, config: RelationConfig) -> Self {
        self.config = config;
        self
    }

    /// Set how many version slots to reserve up front (0 grows lazily).
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.config.initial_capacity = capacity;
        self
    }

    /// Current settings.
    pub fn settings(&self) -> &RelationConfig {
        &self.config
    }

    /// Build the relation.
    ///
    /// Fails with [`Error::InvalidConfig`](crate::Error::InvalidConfig) if
    /// the settings are out of range.
    pub fn build<P, C: ConcurrencyControl>(self) -> Result<Relation<P, C>> {
        let relation = Relation::with_config(&self.config)?;
        tracing::debug!(
            protocol = %C::PROTOCOL,
            initial_capacity = self.config.initial_capacity,
            "relation created"
        );
        Ok(relation)
    }
}
