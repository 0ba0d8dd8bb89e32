// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Pure vector-similarity utilities.
//!
//! Everything in this module is stateless and independent of how the vectors
//! were produced; the embedding provider hands out `Vec<f32>` and these
//! functions take them as plain input.

pub mod ops;

pub use ops::{
    cosine_similarity, euclidean_distance, find_similar, normalize_vector, SimilarityResult,
    VectorError, DEFAULT_TOP_K,
};
