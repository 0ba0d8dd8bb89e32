// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Embedding backend abstraction and shared request options.
//!
//! The provider (see [`provider`]) owns at most one [`EmbeddingBackend`] for
//! the life of the process and hands vectors to callers. Any concrete model
//! runtime plugs in through the two traits defined here; the production
//! implementation is the ONNX Runtime model in [`onnx_model`], loaded via
//! [`fetcher`].

pub mod fetcher;
pub mod onnx_model;
pub mod provider;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use fetcher::{fetch_model_files, ModelFiles};
pub use onnx_model::{OnnxBackendLoader, OnnxEmbeddingModel};
pub use provider::{EmbeddingProvider, ProviderState};

/// Model loaded when a request does not name one (384 dimensions)
pub const DEFAULT_MODEL: &str = "Xenova/all-MiniLM-L6-v2";

/// How token-level model outputs are reduced to one sentence vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pooling {
    /// Attention-mask-weighted mean over all token embeddings
    #[default]
    Mean,
    /// First token ([CLS]) embedding only
    Cls,
}

/// Per-request embedding options
///
/// # Fields
/// - `model`: HuggingFace model id (default: "Xenova/all-MiniLM-L6-v2").
///   Only honored by the very first embed request of the process; the
///   backend is a process-wide singleton and later requests reuse it.
/// - `pooling`: token pooling strategy (default: mean)
/// - `normalize`: whether returned vectors are scaled to unit norm
///   (default: true)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddingOptions {
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default)]
    pub pooling: Pooling,

    #[serde(default = "default_normalize")]
    pub normalize: bool,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_normalize() -> bool {
    true
}

impl Default for EmbeddingOptions {
    fn default() -> Self {
        Self {
            model: default_model(),
            pooling: Pooling::default(),
            normalize: true,
        }
    }
}

#[derive(Error, Debug)]
pub enum EmbeddingError {
    #[error("model loading failed: {0}")]
    ModelLoad(String),

    #[error("tokenization failed: {0}")]
    Tokenization(String),

    #[error("inference failed: {0}")]
    Inference(String),

    #[error("unexpected embedding dimension: {got} (expected {expected})")]
    DimensionMismatch { got: usize, expected: usize },
}

/// A loaded embedding model.
///
/// Implementations must be safe to call from many tasks at once; the
/// provider shares a single instance across all requests.
#[async_trait]
pub trait EmbeddingBackend: Send + Sync {
    /// Embeds a batch of texts, one vector per input, in input order.
    async fn embed(
        &self,
        texts: &[String],
        pooling: Pooling,
        normalize: bool,
    ) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    /// True once the backend can serve embed calls
    fn is_ready(&self) -> bool;

    /// Native output dimension of the loaded model
    fn dimension(&self) -> usize;

    /// Model id this backend was loaded from
    fn model_name(&self) -> &str;
}

/// Creates backends from model ids. Split out from the backend itself so
/// the provider's lifecycle logic can be tested without ONNX Runtime.
#[async_trait]
pub trait BackendLoader: Send + Sync {
    async fn load(&self, model: &str) -> Result<Arc<dyn EmbeddingBackend>, EmbeddingError>;
}
