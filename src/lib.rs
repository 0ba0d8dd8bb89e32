// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod config;
pub mod embeddings;
pub mod vector;
pub mod version;

// Re-export main types
pub use config::ServiceConfig;
pub use embeddings::{
    BackendLoader, EmbeddingBackend, EmbeddingError, EmbeddingOptions, EmbeddingProvider,
    OnnxBackendLoader, OnnxEmbeddingModel, Pooling, ProviderState, DEFAULT_MODEL,
};
pub use vector::{
    cosine_similarity, euclidean_distance, find_similar, normalize_vector, SimilarityResult,
    VectorError,
};
