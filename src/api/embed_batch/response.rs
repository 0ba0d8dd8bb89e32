// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! EmbedBatchResponse type for the POST /v1/embed/batch endpoint.

use serde::{Deserialize, Serialize};

/// Response body for POST /v1/embed/batch
///
/// `embeddings[i]` corresponds to `texts[i]` of the request; the batch is
/// never reordered.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedBatchResponse {
    /// One vector per input text, in input order
    pub embeddings: Vec<Vec<f32>>,

    /// Number of vectors (equals the request's text count)
    pub count: usize,

    /// Vector length shared by every embedding
    pub dimensions: usize,

    /// Model that produced the vectors
    pub model: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_is_camel_case() {
        let response = EmbedBatchResponse {
            embeddings: vec![vec![0.5, 0.5]],
            count: 1,
            dimensions: 2,
            model: "Xenova/all-MiniLM-L6-v2".to_string(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""embeddings":[[0.5,0.5]]"#));
        assert!(json.contains(r#""count":1"#));
        assert!(json.contains(r#""dimensions":2"#));
    }
}
