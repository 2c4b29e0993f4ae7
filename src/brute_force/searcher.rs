//! Brute-force searcher implementation.
//!
//! Every datapoint is compared with the query; no index is built. A scan is a
//! single pass in index order feeding a [`TopK`].

use crate::brute_force::top_k::TopK;
use crate::config::SearchConfig;
use crate::data_format::DenseDataset;
use crate::distance_measures::l2_distance;
use crate::error::{KnnError, Result};
use crate::observer::{NoopObserver, SearchObserver};
use crate::searcher::{SearchParameters, SearchResult, Searcher};
use crate::types::{to_index, DatapointIndex, NNResultsVector};
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Return the `k` database vectors nearest to `query` under L2 distance.
///
/// Results are ascending by distance. Fails with `InvalidArgument` when
/// `k == 0` and with `DimensionMismatch` when any database vector's length
/// differs from the query's. An empty database yields an empty result.
pub fn select_top_k<V>(query: &[f32], database: &[V], k: usize) -> Result<NNResultsVector>
where
    V: AsRef<[f32]>,
{
    select_top_k_observed(query, database, k, &NoopObserver)
}

/// Like [`select_top_k`], notifying `observer` as the scan proceeds.
pub fn select_top_k_observed<V>(
    query: &[f32],
    database: &[V],
    k: usize,
    observer: &dyn SearchObserver,
) -> Result<NNResultsVector>
where
    V: AsRef<[f32]>,
{
    check_k(k)?;
    check_database_len(database.len())?;
    observer.on_scan_start(database.len());
    let results = scan(query, database, 0, k, observer)?.into_sorted();
    observer.on_scan_end(results.len());
    Ok(results)
}

fn check_k(k: usize) -> Result<()> {
    if k == 0 {
        return Err(KnnError::invalid_argument("k must be at least 1"));
    }
    Ok(())
}

/// Largest database whose rows are all addressable by a [`DatapointIndex`].
const MAX_DATABASE_LEN: u64 = DatapointIndex::MAX as u64 + 1;

fn check_database_len(len: usize) -> Result<()> {
    if len as u64 > MAX_DATABASE_LEN {
        return Err(KnnError::invalid_argument(format!(
            "database holds {len} vectors, more than {MAX_DATABASE_LEN} can be indexed"
        )));
    }
    Ok(())
}

/// Scan `rows` in order, where `rows[0]` has dataset index `offset`.
fn scan<V>(
    query: &[f32],
    rows: &[V],
    offset: usize,
    k: usize,
    observer: &dyn SearchObserver,
) -> Result<TopK>
where
    V: AsRef<[f32]>,
{
    let mut top_k = TopK::with_candidate_bound(k, rows.len());
    for (i, row) in rows.iter().enumerate() {
        let index = to_index(offset + i);
        let distance = l2_distance(query, row.as_ref())
            .map_err(|e| e.context(format!("datapoint {index}")))?;
        let admitted = top_k.push(index, distance);
        observer.on_candidate(index, distance, admitted);
    }
    Ok(top_k)
}

/// Brute-force nearest neighbor searcher.
///
/// Holds its dataset behind an [`Arc`], so clones are cheap and independent
/// searches can run on separate threads against the same data.
pub struct BruteForceSearcher {
    /// The dataset to search.
    dataset: Arc<DenseDataset>,

    /// Search settings.
    config: SearchConfig,
}

impl BruteForceSearcher {
    /// Create a new brute-force searcher with default settings.
    pub fn new(dataset: DenseDataset) -> Self {
        Self {
            dataset: Arc::new(dataset),
            config: SearchConfig::default(),
        }
    }

    /// Create a searcher with the given settings.
    pub fn with_config(dataset: DenseDataset, config: SearchConfig) -> Result<Self> {
        Self::with_shared_dataset(Arc::new(dataset), config)
    }

    /// Create a searcher with shared dataset.
    pub fn with_shared_dataset(dataset: Arc<DenseDataset>, config: SearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { dataset, config })
    }

    /// Set whether to shard a query's scan across threads.
    pub fn set_parallel(&mut self, parallel: bool) {
        self.config.parallel = parallel;
    }

    /// Set the number of datapoints per shard. Zero is ignored.
    pub fn set_parallel_chunk_size(&mut self, chunk_size: usize) {
        if chunk_size > 0 {
            self.config.parallel_chunk_size = chunk_size;
        }
    }

    /// Get the dataset.
    pub fn dataset(&self) -> &DenseDataset {
        &self.dataset
    }

    /// Get the search settings.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Search for the k nearest neighbors.
    pub fn search(&self, query: &[f32], k: usize) -> Result<NNResultsVector> {
        self.search_with_observer(query, k, &NoopObserver)
    }

    /// Search for the k nearest neighbors, reporting progress to `observer`.
    pub fn search_with_observer(
        &self,
        query: &[f32],
        k: usize,
        observer: &dyn SearchObserver,
    ) -> Result<NNResultsVector> {
        check_k(k)?;

        let rows = self.dataset.rows();
        check_database_len(rows.len())?;
        let sharded = self.config.parallel && rows.len() > self.config.parallel_chunk_size;
        debug!(
            num_points = rows.len(),
            dim = query.len(),
            k,
            sharded,
            "starting brute-force scan"
        );

        observer.on_scan_start(rows.len());
        let top_k = if sharded {
            self.scan_sharded(query, rows, k, observer)?
        } else {
            scan(query, rows, 0, k, observer)?
        };
        let results = top_k.into_sorted();
        observer.on_scan_end(results.len());

        debug!(num_results = results.len(), "brute-force scan finished");
        Ok(results)
    }

    /// Scan contiguous shards in parallel and merge their partial results.
    ///
    /// On failure the error from the lowest-indexed shard is returned, which
    /// is the error a sequential scan would have hit first. Shards above a
    /// failed one that have not started yet are skipped.
    fn scan_sharded(
        &self,
        query: &[f32],
        rows: &[Vec<f32>],
        k: usize,
        observer: &dyn SearchObserver,
    ) -> Result<TopK> {
        let chunk_size = self.config.parallel_chunk_size;
        let first_failed = AtomicUsize::new(usize::MAX);
        let partials: Vec<Option<Result<TopK>>> = rows
            .par_chunks(chunk_size)
            .enumerate()
            .map(|(shard, chunk)| {
                if shard > first_failed.load(Ordering::Relaxed) {
                    return None;
                }
                let partial = scan(query, chunk, shard * chunk_size, k, observer);
                if partial.is_err() {
                    first_failed.fetch_min(shard, Ordering::Relaxed);
                }
                Some(partial)
            })
            .collect();

        let mut merged = TopK::with_candidate_bound(k, rows.len());
        for partial in partials.into_iter().flatten() {
            merged.merge(partial?);
        }
        Ok(merged)
    }
}

impl Searcher for BruteForceSearcher {
    fn search_with_params(&self, query: &[f32], params: &SearchParameters) -> Result<SearchResult> {
        let k = params.num_neighbors.unwrap_or(self.config.num_neighbors) as usize;
        self.search(query, k).map(SearchResult::from_pairs)
    }

    fn dataset_size(&self) -> usize {
        self.dataset.size()
    }
}

impl Clone for BruteForceSearcher {
    fn clone(&self) -> Self {
        Self {
            dataset: Arc::clone(&self.dataset),
            config: self.config.clone(),
        }
    }
}
