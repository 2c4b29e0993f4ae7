//! One-to-one distance computations.
//!
//! Distances between a pair of dense vectors. Both functions reject vectors of
//! different lengths instead of comparing a prefix.

use crate::error::{KnnError, Result};

/// Compute the L2 (Euclidean) distance between two vectors.
///
/// Returns a `DimensionMismatch` error when `a` and `b` differ in length.
#[inline]
pub fn l2_distance(a: &[f32], b: &[f32]) -> Result<f32> {
    squared_l2_distance(a, b).map(f32::sqrt)
}

/// Compute the squared L2 distance between two vectors.
#[inline]
pub fn squared_l2_distance(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(KnnError::dimension_mismatch(a.len(), b.len()));
    }
    Ok(squared_l2_distance_dense(a, b))
}

/// Squared L2 distance for dense vectors of equal length.
#[inline]
fn squared_l2_distance_dense(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());

    #[cfg(feature = "simd")]
    {
        squared_l2_distance_simd(a, b)
    }

    #[cfg(not(feature = "simd"))]
    {
        a.iter()
            .zip(b.iter())
            .map(|(&x, &y)| {
                let diff = x - y;
                diff * diff
            })
            .sum()
    }
}

#[cfg(feature = "simd")]
fn squared_l2_distance_simd(a: &[f32], b: &[f32]) -> f32 {
    use wide::f32x8;

    let mut sum = f32x8::ZERO;

    let a_chunks = a.chunks_exact(8);
    let b_chunks = b.chunks_exact(8);
    let a_tail = a_chunks.remainder();
    let b_tail = b_chunks.remainder();

    for (ca, cb) in a_chunks.zip(b_chunks) {
        let va = f32x8::new(std::array::from_fn(|i| ca[i]));
        let vb = f32x8::new(std::array::from_fn(|i| cb[i]));
        let diff = va - vb;
        sum += diff * diff;
    }

    let mut result: f32 = sum.reduce_add();

    for (&x, &y) in a_tail.iter().zip(b_tail.iter()) {
        let diff = x - y;
        result += diff * diff;
    }

    result
}
