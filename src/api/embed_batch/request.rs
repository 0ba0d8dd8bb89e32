// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! EmbedBatchRequest type for the POST /v1/embed/batch endpoint.

use serde::{Deserialize, Serialize};

use crate::api::embed::request::{validate_model, validate_text};
use crate::api::ApiError;
use crate::embeddings::{EmbeddingOptions, Pooling, DEFAULT_MODEL};

/// Maximum number of texts per batch request
pub const MAX_BATCH_TEXTS: usize = 96;

/// Request body for POST /v1/embed/batch
///
/// # Example
/// ```json
/// {
///   "texts": ["Hello world", "Another text"],
///   "pooling": "mean"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedBatchRequest {
    /// Texts to embed (1-96 items)
    pub texts: Vec<String>,

    /// Embedding model id; only honored by the first embed request of the
    /// process
    #[serde(default = "default_model")]
    pub model: String,

    /// Token pooling strategy
    #[serde(default)]
    pub pooling: Pooling,

    /// Whether returned vectors are scaled to unit norm
    #[serde(default = "default_normalize")]
    pub normalize: bool,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_normalize() -> bool {
    true
}

impl EmbedBatchRequest {
    /// Validates the request before any backend call is made.
    ///
    /// Rules:
    /// 1. `texts` must contain 1-96 items
    /// 2. each text must be non-empty after trimming and at most 8192 chars
    /// 3. `model` must not be empty
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.texts.is_empty() {
            return Err(ApiError::ValidationError {
                field: "texts".to_string(),
                message: "texts array must contain at least 1 item".to_string(),
            });
        }

        if self.texts.len() > MAX_BATCH_TEXTS {
            return Err(ApiError::ValidationError {
                field: "texts".to_string(),
                message: format!(
                    "texts array cannot contain more than {} items (got {})",
                    MAX_BATCH_TEXTS,
                    self.texts.len()
                ),
            });
        }

        for (index, text) in self.texts.iter().enumerate() {
            validate_text(&format!("texts[{}]", index), text)?;
        }

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
