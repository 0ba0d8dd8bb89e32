// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Process-wide embedding backend lifecycle.
//!
//! The provider owns at most one backend for the life of the process. It is
//! created lazily by the first embed call (an expensive one-time load) and
//! never replaced afterwards, even when a later request names a different
//! model. That last part mirrors the behavior this service contract was
//! lifted from; requests for other models are honored with the already-
//! loaded backend and a warning is logged so operators can see the
//! mismatch.
//!
//! Initialization is single-flight: concurrent first callers await one
//! in-flight load, and a failed load leaves the slot empty so the next
//! call can retry.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::{info, warn};

use super::{BackendLoader, EmbeddingBackend, EmbeddingError, EmbeddingOptions};

/// Read-only snapshot of the provider lifecycle
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderState {
    /// True once a backend has been created (regardless of which model)
    pub is_initialized: bool,
    /// Model id of the loaded backend, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Lazily-initialized, shared embedding backend
pub struct EmbeddingProvider {
    loader: Arc<dyn BackendLoader>,
    backend: OnceCell<Arc<dyn EmbeddingBackend>>,
}

impl EmbeddingProvider {
    pub fn new(loader: Arc<dyn BackendLoader>) -> Self {
        Self {
            loader,
            backend: OnceCell::new(),
        }
    }

    /// Returns the shared backend, loading it on first call.
    ///
    /// The `model` argument only matters for the call that actually
    /// performs the load; once a backend exists it is returned unchanged.
    /// Load failures propagate to the caller and do not poison the slot,
    /// so a later call retries the load.
    pub async fn initialize(
        &self,
        model: &str,
    ) -> Result<Arc<dyn EmbeddingBackend>, EmbeddingError> {
        let backend = self
            .backend
            .get_or_try_init(|| async {
                info!("🧠 Loading embedding backend: {}", model);
                self.loader.load(model).await
            })
            .await?;

        if backend.model_name() != model {
            warn!(
                "Requested model {} but {} is already loaded; reusing the loaded backend",
                model,
                backend.model_name()
            );
        }

        Ok(backend.clone())
    }

    /// Embeds a single text, returning one vector of the model's native
    /// dimension.
    pub async fn embed_one(
        &self,
        text: &str,
        options: &EmbeddingOptions,
    ) -> Result<Vec<f32>, EmbeddingError> {
        let backend = self.initialize(&options.model).await?;
        let texts = [text.to_string()];
        let mut vectors = backend
            .embed(&texts, options.pooling, options.normalize)
            .await?;

        if vectors.len() != 1 {
            return Err(EmbeddingError::Inference(format!(
                "backend returned {} vectors for 1 text",
                vectors.len()
            )));
        }

        Ok(vectors.remove(0))
    }

    /// Embeds a batch of texts in one backend call; output order matches
    /// input order.
    pub async fn embed_many(
        &self,
        texts: &[String],
        options: &EmbeddingOptions,
    ) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let backend = self.initialize(&options.model).await?;
        let vectors = backend
            .embed(texts, options.pooling, options.normalize)
            .await?;

        if vectors.len() != texts.len() {
            return Err(EmbeddingError::Inference(format!(
                "backend returned {} vectors for {} texts",
                vectors.len(),
                texts.len()
            )));
        }

        Ok(vectors)
    }

    /// Lifecycle introspection; never triggers a load.
    pub fn state(&self) -> ProviderState {
        match self.backend.get() {
            Some(backend) => ProviderState {
                is_initialized: backend.is_ready(),
                model: Some(backend.model_name().to_string()),
            },
            None => ProviderState {
                is_initialized: false,
                model: None,
            },
        }
    }

    /// Native dimension of the loaded model, if initialized
    pub fn dimension(&self) -> Option<usize> {
        self.backend.get().map(|b| b.dimension())
    }
}
