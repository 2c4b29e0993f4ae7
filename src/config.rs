//! Configuration types for bruteknn.
//!
//! [`SearchConfig`] is plain serde data so it can be stored as JSON next to
//! the vector files it is used with.

use crate::error::{KnnError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default number of neighbors to return.
pub const DEFAULT_NUM_NEIGHBORS: u32 = 10;

/// Default number of datapoints scanned by one worker in a sharded search.
pub const DEFAULT_PARALLEL_CHUNK_SIZE: usize = 4096;

/// Configuration for a brute-force searcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Number of neighbors to return.
    pub num_neighbors: u32,

    /// Shard a single query's scan across the rayon thread pool.
    pub parallel: bool,

    /// Datapoints per shard when `parallel` is set.
    pub parallel_chunk_size: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            num_neighbors: DEFAULT_NUM_NEIGHBORS,
            parallel: false,
            parallel_chunk_size: DEFAULT_PARALLEL_CHUNK_SIZE,
        }
    }
}

impl SearchConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of neighbors to return.
    pub fn with_num_neighbors(mut self, k: u32) -> Self {
        self.num_neighbors = k;
        self
    }

    /// Enable or disable sharded scanning.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the shard size for sharded scanning.
    pub fn with_parallel_chunk_size(mut self, chunk_size: usize) -> Self {
        self.parallel_chunk_size = chunk_size;
        self
    }

    /// Check that the configuration can be searched with.
    pub fn validate(&self) -> Result<()> {
        if self.num_neighbors == 0 {
            return Err(KnnError::invalid_argument("num_neighbors must be at least 1"));
        }
        if self.parallel_chunk_size == 0 {
            return Err(KnnError::invalid_argument(
                "parallel_chunk_size must be at least 1",
            ));
        }
        Ok(())
    }

    /// Load and validate a configuration from a JSON file.
    ///
    /// Missing fields take their default values.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| KnnError::from(e).context(path.display()))?;
        let config: SearchConfig =
            serde_json::from_str(&raw).map_err(|e| KnnError::from(e).context(path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration as pretty-printed JSON.
    pub fn to_json_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| KnnError::from(e).context(path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.num_neighbors, 10);
        assert!(!config.parallel);
        assert_eq!(config.parallel_chunk_size, DEFAULT_PARALLEL_CHUNK_SIZE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero() {
        let err = SearchConfig::new().with_num_neighbors(0).validate().unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidArgument);

        let err = SearchConfig::new()
            .with_parallel_chunk_size(0)
            .validate()
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidArgument);
    }

    #[test]
    fn test_config_serialization() {
        let config = SearchConfig::new()
            .with_num_neighbors(20)
            .with_parallel(true)
            .with_parallel_chunk_size(128);

        let json = serde_json::to_string(&config).unwrap();
        let deserialized: SearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, config);
    }

    #[test]
    fn test_config_partial_json() {
        let config: SearchConfig = serde_json::from_str(r#"{"parallel": true}"#).unwrap();
        assert!(config.parallel);
        assert_eq!(config.num_neighbors, DEFAULT_NUM_NEIGHBORS);
    }

    #[test]
    fn test_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("search.json");

        let config = SearchConfig::new().with_num_neighbors(3);
        config.to_json_file(&path).unwrap();
        assert_eq!(SearchConfig::from_json_file(&path).unwrap(), config);

        std::fs::write(&path, "{ not json").unwrap();
        let err = SearchConfig::from_json_file(&path).unwrap_err();
        assert_eq!(err.code(), ErrorCode::DataLoss);
    }
}
