// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Vector math over `f32` slices: cosine similarity, Euclidean distance,
//! normalization, and top-K nearest-neighbor ranking.
//!
//! All functions are pure. Length mismatches are reported as errors rather
//! than truncating the longer vector. Zero-norm inputs have defined
//! fallbacks: cosine similarity against a zero vector is `0.0` and
//! normalizing a zero vector returns it unchanged; neither is an error.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of neighbors returned by [`find_similar`]
pub const DEFAULT_TOP_K: usize = 5;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VectorError {
    #[error("vector dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },
}

/// One ranked candidate from [`find_similar`]
///
/// `index` refers to the candidate's position in the input collection,
/// `similarity` is the cosine similarity against the query, in [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityResult {
    pub index: usize,
    pub similarity: f32,
}

fn magnitude(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

fn check_dimensions(a: &[f32], b: &[f32]) -> Result<(), VectorError> {
    if a.len() != b.len() {
        return Err(VectorError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(())
}

/// Computes the cosine similarity between two vectors of equal length.
///
/// Returns `0.0` when either vector has zero norm; there is nothing
/// meaningful to compare against, and callers treat the pair as unrelated
/// rather than hitting a division by zero.
///
/// # Errors
/// [`VectorError::DimensionMismatch`] when the lengths differ.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32, VectorError> {
    check_dimensions(a, b)?;

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let magnitude_a = magnitude(a);
    let magnitude_b = magnitude(b);

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        Ok(0.0)
    } else {
        Ok(dot_product / (magnitude_a * magnitude_b))
    }
}

/// Computes the Euclidean distance between two vectors of equal length.
///
/// The result is always non-negative and is `0.0` exactly when the vectors
/// are identical.
///
/// # Errors
/// [`VectorError::DimensionMismatch`] when the lengths differ.
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> Result<f32, VectorError> {
    check_dimensions(a, b)?;

    Ok(a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f32>()
        .sqrt())
}

/// Returns a copy of `v` scaled to unit norm.
///
/// A zero vector is returned unchanged; it has no direction to preserve.
/// The input is never mutated.
pub fn normalize_vector(v: &[f32]) -> Vec<f32> {
    let norm = magnitude(v);
    if norm == 0.0 {
        v.to_vec()
    } else {
        v.iter().map(|x| x / norm).collect()
    }
}

/// Ranks `candidates` by cosine similarity against `query`, descending.
///
/// Returns the `min(top_k, candidates.len())` best matches. The sort is
/// stable, so candidates with equal similarity keep their input order.
/// `top_k == 0` yields an empty result.
///
/// # Errors
/// [`VectorError::DimensionMismatch`] if any candidate's length differs
/// from the query's; the whole call fails, no partial ranking is returned.
pub fn find_similar(
    query: &[f32],
    candidates: &[Vec<f32>],
    top_k: usize,
) -> Result<Vec<SimilarityResult>, VectorError> {
    let mut results = Vec::with_capacity(candidates.len());

    for (index, candidate) in candidates.iter().enumerate() {
        let similarity = cosine_similarity(query, candidate)?;
        results.push(SimilarityResult { index, similarity });
    }

    // Stable sort keeps input order among equal similarities
    results.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    results.truncate(top_k);
    Ok(results)
}
