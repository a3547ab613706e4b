//! Configuration for packofs
//!
//! Construction parameters for an offset index, with sensible defaults.

use crate::oid::HashAlgorithm;

/// Parameters used when building an [`OffsetIndex`](crate::OffsetIndex)
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of records to reserve storage for up front.
    /// Exceeding it only triggers reallocation.
    pub capacity_hint: usize,

    /// Algorithm of the object ids stored in the index
    pub hash_algorithm: HashAlgorithm,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity_hint: 1024,
            hash_algorithm: HashAlgorithm::Sha1,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the number of records to pre-allocate
    pub fn capacity_hint(mut self, capacity: usize) -> Self {
        self.config.capacity_hint = capacity;
        self
    }

    /// Set the object id algorithm
    pub fn hash_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.config.hash_algorithm = algorithm;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
