// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! SimilarityRequest type for the POST /v1/similarity endpoint.

use serde::{Deserialize, Serialize};

use crate::api::embed::request::{validate_model, validate_text};
use crate::api::ApiError;
use crate::embeddings::{EmbeddingOptions, Pooling, DEFAULT_MODEL};

/// Request body for POST /v1/similarity
///
/// # Example
/// ```json
/// {
///   "textA": "The cat sat on the mat",
///   "textB": "A feline rested on the rug"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityRequest {
    /// First text to compare
    pub text_a: String,

    /// Second text to compare
    pub text_b: String,

    /// Embedding model id; only honored by the first embed request of the
    /// process
    #[serde(default = "default_model")]
    pub model: String,

    /// Token pooling strategy
    #[serde(default)]
    pub pooling: Pooling,

    /// Whether vectors are unit-normalized before comparison
    #[serde(default = "default_normalize")]
    pub normalize: bool,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_normalize() -> bool {
    true
}

impl SimilarityRequest {
    /// Validates both texts before any backend call is made.
    pub fn validate(&self) -> Result<(), ApiError> {
        validate_text("textA", &self.text_a)?;
        validate_text("textB", &self.text_b)?;
        validate_model(&self.model)
    }

    pub fn options(&self) -> EmbeddingOptions {
        EmbeddingOptions {
            model: self.model.clone(),
            pooling: self.pooling,
            normalize: self.normalize,
        }
    }
}
