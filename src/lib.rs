//! # bruteknn - exact k-nearest-neighbor search
//!
//! A brute-force nearest neighbor searcher: every database vector is compared
//! with the query under Euclidean (L2) distance and the k closest are kept in
//! a bounded max-heap. No index is built, so results are exact. It is meant as
//! the correctness baseline that approximate searchers are measured against.
//!
//! ## Quick Start
//!
//! ```rust
//! use bruteknn::prelude::*;
//!
//! let dataset = DenseDataset::from_vecs(vec![
//!     vec![0.0, 0.0],
//!     vec![1.0, 0.0],
//!     vec![0.0, 1.0],
//!     vec![5.0, 5.0],
//! ]);
//! let searcher = BruteForceSearcher::new(dataset);
//!
//! let results = searcher.search(&[0.0, 0.0], 2).unwrap();
//! assert_eq!(results, vec![(0, 0.0), (1, 1.0)]);
//! ```
//!
//! ## Ranking rules
//!
//! - Results are ascending by distance.
//! - While the heap is full, a candidate is admitted only if its distance is
//!   strictly below the worst retained one. Of several candidates at the same
//!   distance, the ones seen first (lowest index) win.
//! - A query and a database vector of different lengths fail the whole search
//!   with [`ErrorCode::DimensionMismatch`]; `k == 0` fails with
//!   [`ErrorCode::InvalidArgument`].
//!
//! ## Module Overview
//!
//! - [`brute_force`]: the searcher and top-k selection
//! - [`distance_measures`]: Euclidean distance
//! - [`data_format`]: the in-memory dataset and `.fvecs` files
//! - [`observer`]: progress callbacks for long scans

pub mod brute_force;
pub mod data_format;
pub mod distance_measures;
pub mod observer;

mod config;
mod error;
mod searcher;
mod types;

pub use config::{SearchConfig, DEFAULT_NUM_NEIGHBORS, DEFAULT_PARALLEL_CHUNK_SIZE};
pub use error::{ErrorCode, KnnError, Result, StatusExt};
pub use searcher::{NNResult, SearchParameters, SearchResult, Searcher};
pub use types::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::brute_force::{select_top_k, select_top_k_observed, BruteForceSearcher, TopK};
    pub use crate::config::SearchConfig;
    pub use crate::data_format::{read_fvecs, write_fvecs, DenseDataset};
    pub use crate::distance_measures::{l2_distance, squared_l2_distance};
    pub use crate::error::{ErrorCode, KnnError, Result};
    pub use crate::observer::{CallbackObserver, NoopObserver, ProgressLogger, SearchObserver};
    pub use crate::searcher::{NNResult, SearchParameters, SearchResult, Searcher};
    pub use crate::types::*;
}
