//! Relation configuration
//!
//! ```toml
//! initial_capacity = 100
//! ```

use crate::error::{RelationError, Result};
use serde::{Deserialize, Serialize};

/// Default number of version slots reserved up front
pub const DEFAULT_INITIAL_CAPACITY: usize = 100;

/// Largest accepted up-front reservation
pub const MAX_INITIAL_CAPACITY: usize = 1 << 24;

/// Settings for a [`Relation`](crate::Relation)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RelationConfig {
    /// Version slots reserved when the relation is created; 0 grows lazily
    pub initial_capacity: usize,
}

impl Default for RelationConfig {
    fn default() -> Self {
        RelationConfig {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }
}

impl RelationConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: RelationConfig =
            toml::from_str(s).map_err(|e| RelationError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the settings are usable
    pub fn validate(&self) -> Result<()> {
        if self.initial_capacity > MAX_INITIAL_CAPACITY {
            return Err(RelationError::InvalidConfig(format!(
                "initial_capacity {} exceeds maximum {}",
                self.initial_capacity, MAX_INITIAL_CAPACITY
            )));
        }
        Ok(())
    }
}
