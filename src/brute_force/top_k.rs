//! Top-K selection.
//!
//! [`TopK`] tracks the k nearest candidates seen so far during a scan.

use crate::types::{DatapointIndex, NNResultPair, NNResultsVector};
use ordered_float::OrderedFloat;
use std::collections::BinaryHeap;

/// A max-heap based top-k tracker.
///
/// Maintains the k smallest distances seen so far. The heap root is the worst
/// retained candidate, so a new candidate is compared against it and either
/// replaces it or is dropped.
///
/// Candidates are keyed by `(distance, index)`. When candidates arrive in
/// ascending index order, which is how a scan feeds them, [`TopK::push`]
/// admits a candidate only if its distance is strictly below the current
/// worst: a candidate tying the worst is rejected and the earlier one keeps
/// its place. The retained set is therefore always the k smallest candidates
/// ordered by distance, then index. NaN distances rank after every number.
#[derive(Debug, Clone)]
pub struct TopK {
    /// Max-heap of (distance, index) pairs.
    heap: BinaryHeap<(OrderedFloat<f32>, DatapointIndex)>,

    /// Maximum capacity.
    k: usize,
}

impl TopK {
    /// Create a new top-k tracker. The heap grows as candidates arrive.
    pub fn new(k: usize) -> Self {
        Self {
            heap: BinaryHeap::new(),
            k,
        }
    }

    /// Create a top-k tracker that will be offered at most `num_candidates`
    /// candidates, preallocating only what can actually be retained.
    pub fn with_candidate_bound(k: usize, num_candidates: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(k.min(num_candidates).saturating_add(1)),
            k,
        }
    }

    /// Get the current size.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Get the capacity (k).
    pub fn capacity(&self) -> usize {
        self.k
    }

    /// Check whether k candidates are retained.
    pub fn is_full(&self) -> bool {
        self.heap.len() >= self.k
    }

    /// Get the current threshold distance.
    /// If we have k elements, this is the largest retained distance.
    /// Otherwise, returns infinity.
    pub fn threshold(&self) -> f32 {
        if self.is_full() {
            self.heap.peek().map(|(d, _)| d.0).unwrap_or(f32::INFINITY)
        } else {
            f32::INFINITY
        }
    }

    /// Offer the next candidate of a scan.
    ///
    /// Returns true if the candidate was admitted.
    pub fn push(&mut self, index: DatapointIndex, distance: f32) -> bool {
        let distance = OrderedFloat(distance);
        if self.heap.len() < self.k {
            self.heap.push((distance, index));
            return true;
        }
        match self.heap.peek() {
            Some(&(worst, _)) if distance < worst => {
                self.heap.pop();
                self.heap.push((distance, index));
                true
            }
            _ => false,
        }
    }

    /// Check if a distance would be accepted by [`TopK::push`].
    #[inline]
    pub fn would_accept(&self, distance: f32) -> bool {
        !self.is_full()
            || self
                .heap
                .peek()
                .is_some_and(|&(worst, _)| OrderedFloat(distance) < worst)
    }

    /// Fold another tracker's candidates into this one.
    ///
    /// Candidates are compared by `(distance, index)`, so merging the partial
    /// results of contiguous index ranges gives the same set as one scan over
    /// the whole range, whatever order the parts are merged in.
    pub fn merge(&mut self, other: TopK) {
        for key in other.heap {
            if self.heap.len() < self.k {
                self.heap.push(key);
            } else if self.heap.peek().is_some_and(|worst| key < *worst) {
                self.heap.pop();
                self.heap.push(key);
            }
        }
    }

    /// Clear the tracker.
    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// Get results sorted by distance (ascending), ties by index.
    pub fn results(&self) -> NNResultsVector {
        let mut keys: Vec<_> = self.heap.iter().copied().collect();
        keys.sort_unstable();
        keys.into_iter().map(to_pair).collect()
    }

    /// Consume the tracker, returning results sorted by distance (ascending),
    /// ties by index.
    pub fn into_sorted(self) -> NNResultsVector {
        self.heap.into_sorted_vec().into_iter().map(to_pair).collect()
    }
}

#[inline]
fn to_pair((distance, index): (OrderedFloat<f32>, DatapointIndex)) -> NNResultPair {
    (index, distance.0)
}
