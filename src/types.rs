//! Core type definitions for bruteknn.

/// Index type for datapoints in a dataset.
/// Can represent up to 4 billion datapoints with u32.
pub type DatapointIndex = u32;

/// A nearest neighbor candidate: (index, distance).
pub type NNResultPair = (DatapointIndex, f32);

/// Vector of nearest neighbor results, ascending by distance.
pub type NNResultsVector = Vec<NNResultPair>;

/// Convert a position in a dataset into a [`DatapointIndex`].
///
/// Searches reject databases too large to index before scanning.
#[inline]
pub(crate) fn to_index(position: usize) -> DatapointIndex {
    debug_assert!(position <= DatapointIndex::MAX as usize);
    position as DatapointIndex
}
