// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! SimilarityResponse type and the categorical similarity label.

use serde::{Deserialize, Serialize};

/// Response body for POST /v1/similarity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityResponse {
    /// Cosine similarity of the two embeddings, in [-1, 1]
    pub similarity: f32,

    /// Human-readable bucket for the similarity value
    pub label: String,

    /// Model that produced the embeddings
    pub model: String,
}

/// Maps a cosine similarity to its categorical label.
///
/// Thresholds are strict, so boundary values fall into the lower bucket:
/// exactly 0.8 is "Similar", exactly 0.4 is "Not similar".
pub fn similarity_label(similarity: f32) -> &'static str {
    if similarity > 0.8 {
        "Very similar"
    } else if similarity > 0.6 {
        "Similar"
    } else if similarity > 0.4 {
        "Somewhat similar"
    } else {
        "Not similar"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_buckets() {
        assert_eq!(similarity_label(0.95), "Very similar");
        assert_eq!(similarity_label(0.7), "Similar");
        assert_eq!(similarity_label(0.5), "Somewhat similar");
        assert_eq!(similarity_label(0.1), "Not similar");
        assert_eq!(similarity_label(-0.3), "Not similar");
    }

    #[test]
    fn test_boundary_values_fall_into_lower_bucket() {
        assert_eq!(similarity_label(0.8), "Similar");
        assert_eq!(similarity_label(0.6), "Somewhat similar");
        assert_eq!(similarity_label(0.4), "Not similar");
    }
}
