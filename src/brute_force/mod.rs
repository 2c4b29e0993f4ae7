//! Brute-force nearest neighbor search.
//!
//! This module provides exact nearest neighbor search by exhaustively
//! computing distances to all datapoints.

mod searcher;
mod top_k;

pub use searcher::{select_top_k, select_top_k_observed, BruteForceSearcher};
pub use top_k::TopK;
