//! Search progress observers.
//!
//! A [`SearchObserver`] is notified as a scan proceeds. Observers only watch:
//! nothing they do can change which candidates are admitted. Sharded scans
//! call [`SearchObserver::on_candidate`] from several worker threads, so
//! implementations must be `Sync`.

use crate::types::DatapointIndex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::info;

/// Receives notifications during a brute-force scan.
pub trait SearchObserver: Send + Sync {
    /// Called once before the first comparison, with the database size.
    fn on_scan_start(&self, _total: usize) {}

    /// Called after each comparison.
    ///
    /// `admitted` reports whether the candidate entered its top-k set. In a
    /// sharded scan this refers to the worker's local set, and shards already
    /// running when another shard fails still report their comparisons.
    fn on_candidate(&self, _index: DatapointIndex, _distance: f32, _admitted: bool) {}

    /// Called once after a successful scan, with the result set size. A scan
    /// that fails never reaches this.
    fn on_scan_end(&self, _num_results: usize) {}
}

/// Observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

/// Logs scan progress at every tenth of the database.
#[derive(Debug, Default)]
pub struct ProgressLogger {
    total: AtomicUsize,
    seen: AtomicUsize,
}

impl ProgressLogger {
    /// Create a new progress logger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of comparisons observed since the last scan started.
    pub fn seen(&self) -> usize {
        self.seen.load(Ordering::Relaxed)
    }
}

impl SearchObserver for ProgressLogger {
    fn on_scan_start(&self, total: usize) {
        self.total.store(total, Ordering::Relaxed);
        self.seen.store(0, Ordering::Relaxed);
        info!("Comparing query vector against {} vectors...", total);
    }

    fn on_candidate(&self, _index: DatapointIndex, _distance: f32, _admitted: bool) {
        let seen = self.seen.fetch_add(1, Ordering::Relaxed) + 1;
        let total = self.total.load(Ordering::Relaxed);
        // No progress lines for fewer than ten vectors.
        if total >= 10 && seen % (total / 10) == 0 {
            info!("Progress: {}/{} vectors", seen, total);
        }
    }
}

/// Observer backed by a closure invoked for every comparison.
pub struct CallbackObserver<F>
where
    F: Fn(DatapointIndex, f32, bool) + Send + Sync,
{
    callback: F,
}

impl<F> CallbackObserver<F>
where
    F: Fn(DatapointIndex, f32, bool) + Send + Sync,
{
    /// Create a new callback observer.
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> SearchObserver for CallbackObserver<F>
where
    F: Fn(DatapointIndex, f32, bool) + Send + Sync,
{
    fn on_candidate(&self, index: DatapointIndex, distance: f32, admitted: bool) {
        (self.callback)(index, distance, admitted);
    }
}
