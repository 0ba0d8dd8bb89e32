// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! EmbedResponse type for the POST /v1/embed endpoint.

use serde::{Deserialize, Serialize};

/// Response body for POST /v1/embed
///
/// # Example
/// ```json
/// {
///   "embedding": [0.1, 0.2, ...],
///   "dimensions": 384,
///   "model": "Xenova/all-MiniLM-L6-v2"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedResponse {
    /// Embedding vector at the model's native dimension
    pub embedding: Vec<f32>,

    /// Vector length
    pub dimensions: usize,

    /// Model that produced the vector (the loaded backend's model, which
    /// may differ from the requested one after the first load)
    pub model: String,
}
