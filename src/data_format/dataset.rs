//! Dataset types for bruteknn.
//!
//! A [`DenseDataset`] is the ordered database a search scans. Row position is
//! the datapoint's identity.

use crate::error::{KnnError, Result};
use crate::types::{to_index, DatapointIndex};

/// An ordered collection of dense vectors.
///
/// Rows are not required to share a length when loaded. Dimension agreement
/// is checked when a row is compared against a query, so a malformed row
/// surfaces as a `DimensionMismatch` from the search that reaches it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DenseDataset {
    rows: Vec<Vec<f32>>,
}

impl DenseDataset {
    /// Create an empty dense dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty dataset with room for `capacity` rows.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: Vec::with_capacity(capacity),
        }
    }

    /// Create a dense dataset from a vector of vectors.
    pub fn from_vecs(rows: Vec<Vec<f32>>) -> Self {
        Self { rows }
    }

    /// Create a dense dataset from a flat, row-major array.
    pub fn from_flat(data: &[f32], dimensionality: usize) -> Result<Self> {
        if dimensionality == 0 {
            return Err(KnnError::invalid_argument("Dimensionality cannot be 0"));
        }
        if data.len() % dimensionality != 0 {
            return Err(KnnError::invalid_argument(format!(
                "Data length {} is not a multiple of dimensionality {}",
                data.len(),
                dimensionality
            )));
        }

        Ok(Self {
            rows: data.chunks_exact(dimensionality).map(<[f32]>::to_vec).collect(),
        })
    }

    /// Append a datapoint, returning its index.
    pub fn append(&mut self, datapoint: Vec<f32>) -> DatapointIndex {
        self.rows.push(datapoint);
        to_index(self.rows.len() - 1)
    }

    /// Get the number of datapoints.
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    /// Check if the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Dimensionality of the first datapoint, or `None` when empty.
    pub fn dimensionality(&self) -> Option<usize> {
        self.rows.first().map(Vec::len)
    }

    /// Get a datapoint by index.
    pub fn get(&self, index: DatapointIndex) -> Option<&[f32]> {
        self.rows.get(index as usize).map(Vec::as_slice)
    }

    /// All rows in index order.
    pub fn rows(&self) -> &[Vec<f32>] {
        &self.rows
    }

    /// Iterate over rows in index order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &[f32]> + '_ {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Remove all datapoints.
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Take the rows back out of the dataset.
    pub fn into_vecs(self) -> Vec<Vec<f32>> {
        self.rows
    }
}

impl From<Vec<Vec<f32>>> for DenseDataset {
    fn from(rows: Vec<Vec<f32>>) -> Self {
        Self::from_vecs(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_dense_dataset_from_vecs() {
        let dataset = DenseDataset::from_vecs(vec![
            vec![1.0, 2.0, 3.0],
            vec![4.0, 5.0, 6.0],
        ]);

        assert_eq!(dataset.size(), 2);
        assert_eq!(dataset.dimensionality(), Some(3));
        assert_eq!(dataset.get(1).unwrap(), &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_dense_dataset_from_flat() {
        let dataset = DenseDataset::from_flat(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 3).unwrap();
        assert_eq!(dataset.size(), 2);
        assert_eq!(dataset.get(0).unwrap(), &[1.0, 2.0, 3.0]);

        let err = DenseDataset::from_flat(&[1.0, 2.0, 3.0], 2).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidArgument);

        let err = DenseDataset::from_flat(&[], 0).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidArgument);
    }

    #[test]
    fn test_dense_dataset_append() {
        let mut dataset = DenseDataset::new();
        assert_eq!(dataset.append(vec![1.0, 2.0]), 0);
        assert_eq!(dataset.append(vec![3.0, 4.0]), 1);
        assert_eq!(dataset.size(), 2);
    }

    #[test]
    fn test_dense_dataset_accepts_ragged_rows() {
        let dataset = DenseDataset::from_vecs(vec![vec![1.0, 2.0], vec![3.0]]);
        assert_eq!(dataset.size(), 2);
        assert_eq!(dataset.dimensionality(), Some(2));
    }

    #[test]
    fn test_dense_dataset_reuse() {
        let mut dataset = DenseDataset::with_capacity(4);
        assert!(dataset.is_empty());
        dataset.append(vec![1.0, 2.0]);
        dataset.append(vec![3.0]);

        let lengths: Vec<usize> = dataset.iter().map(<[f32]>::len).collect();
        assert_eq!(lengths, vec![2, 1]);
        assert_eq!(dataset.iter().len(), 2);

        let rows = dataset.clone().into_vecs();
        assert_eq!(DenseDataset::from(rows), dataset);

        dataset.clear();
        assert!(dataset.is_empty());
        assert_eq!(dataset.iter().next(), None);
    }

    #[test]
    fn test_dataset_out_of_bounds() {
        let dataset = DenseDataset::from_vecs(vec![vec![1.0]]);
        assert!(dataset.get(1).is_none());
        assert!(DenseDataset::new().dimensionality().is_none());
    }
}
