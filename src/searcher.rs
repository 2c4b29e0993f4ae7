//! Searcher traits and common types.
//!
//! This module defines the searcher interface and the struct-shaped view of a
//! result set.

use crate::error::Result;
use crate::types::{DatapointIndex, NNResultsVector};
use serde::{Deserialize, Serialize};

/// Parameters for a single search query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchParameters {
    /// Number of neighbors to return. Falls back to the searcher's configured
    /// value when unset.
    pub num_neighbors: Option<u32>,
}

impl SearchParameters {
    /// Create new parameters with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of neighbors to return.
    pub fn with_num_neighbors(mut self, k: u32) -> Self {
        self.num_neighbors = Some(k);
        self
    }
}

/// A single nearest neighbor result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NNResult {
    /// Index of the datapoint in the dataset.
    pub index: DatapointIndex,

    /// Distance to the query point.
    pub distance: f32,
}

impl NNResult {
    /// Create a new result.
    pub fn new(index: DatapointIndex, distance: f32) -> Self {
        Self { index, distance }
    }
}

/// Result of a search query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Nearest neighbors sorted by distance.
    pub neighbors: Vec<NNResult>,
}

impl SearchResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a result from neighbor pairs.
    pub fn from_pairs(pairs: NNResultsVector) -> Self {
        Self {
            neighbors: pairs
                .into_iter()
                .map(|(idx, dist)| NNResult::new(idx, dist))
                .collect(),
        }
    }

    /// Get the number of results.
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    /// Get the indices of the neighbors.
    pub fn indices(&self) -> Vec<DatapointIndex> {
        self.neighbors.iter().map(|r| r.index).collect()
    }

    /// Get the distances to the neighbors.
    pub fn distances(&self) -> Vec<f32> {
        self.neighbors.iter().map(|r| r.distance).collect()
    }

    /// Get the top result if available.
    pub fn top(&self) -> Option<&NNResult> {
        self.neighbors.first()
    }
}

/// Trait for nearest neighbor searchers.
pub trait Searcher: Send + Sync {
    /// Search for nearest neighbors with the given parameters.
    fn search_with_params(&self, query: &[f32], params: &SearchParameters) -> Result<SearchResult>;

    /// Search for the `k` nearest neighbors.
    fn search_k(&self, query: &[f32], k: u32) -> Result<SearchResult> {
        let params = SearchParameters::new().with_num_neighbors(k);
        self.search_with_params(query, &params)
    }

    /// Get the size of the dataset.
    fn dataset_size(&self) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_parameters() {
        let params = SearchParameters::new().with_num_neighbors(10);
        assert_eq!(params.num_neighbors, Some(10));
        assert_eq!(SearchParameters::new().num_neighbors, None);
    }

    #[test]
    fn test_search_result() {
        let pairs = vec![(0, 1.0), (1, 2.0), (2, 3.0)];
        let result = SearchResult::from_pairs(pairs);

        assert_eq!(result.len(), 3);
        assert_eq!(result.indices(), vec![0, 1, 2]);
        assert_eq!(result.distances(), vec![1.0, 2.0, 3.0]);
        assert_eq!(result.top().unwrap().index, 0);
    }

    #[test]
    fn test_search_result_json() {
        let result = SearchResult::from_pairs(vec![(4, 0.5)]);
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"neighbors":[{"index":4,"distance":0.5}]}"#);
    }
}
