// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Embedding provider lifecycle tests: single-flight initialization under
//! concurrency, the first-model-wins singleton behavior, and retry after a
//! failed load.

use async_trait::async_trait;
use embed_node::embeddings::{
    BackendLoader, EmbeddingBackend, EmbeddingError, EmbeddingOptions, EmbeddingProvider, Pooling,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Backend that encodes the text's byte length into a fixed-dimension
/// vector, good enough to check ordering and dimensions without a model.
struct StubBackend {
    model: String,
}

#[async_trait]
impl EmbeddingBackend for StubBackend {
    async fn embed(
        &self,
        texts: &[String],
        _pooling: Pooling,
        _normalize: bool,
    ) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Ok(texts
            .iter()
            .map(|t| vec![t.len() as f32, 1.0, 0.0])
            .collect())
    }

    fn is_ready(&self) -> bool {
        true
    }

    fn dimension(&self) -> usize {
        3
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Loader that counts invocations, holds the load open briefly to widen
/// races, and can fail its first call.
struct StubLoader {
    loads: AtomicUsize,
    fail_next: AtomicBool,
}

impl StubLoader {
    fn new() -> Self {
        Self {
            loads: AtomicUsize::new(0),
            fail_next: AtomicBool::new(false),
        }
    }

    fn failing_once() -> Self {
        Self {
            loads: AtomicUsize::new(0),
            fail_next: AtomicBool::new(true),
        }
    }
}

#[async_trait]
impl BackendLoader for StubLoader {
    async fn load(&self, model: &str) -> Result<Arc<dyn EmbeddingBackend>, EmbeddingError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(20)).await;

        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(EmbeddingError::ModelLoad(
                "simulated weight fetch failure".to_string(),
            ));
        }

        Ok(Arc::new(StubBackend {
            model: model.to_string(),
        }))
    }
}

fn options_for(model: &str) -> EmbeddingOptions {
    EmbeddingOptions {
        model: model.to_string(),
        ..EmbeddingOptions::default()
    }
}

#[tokio::test]
async fn test_concurrent_first_embeds_create_exactly_one_backend() {
    let loader = Arc::new(StubLoader::new());
    let provider = Arc::new(EmbeddingProvider::new(loader.clone()));

    let mut handles = Vec::new();
    for i in 0..8 {
        let provider = provider.clone();
        // Every caller asks for a different model; whichever wins the race
        // decides what gets loaded
        handles.push(tokio::spawn(async move {
            provider
                .embed_one("race", &options_for(&format!("model-{}", i)))
                .await
        }));
    }

    for handle in handles {
        let vector = handle.await.unwrap().unwrap();
        assert_eq!(vector.len(), 3);
    }

    assert_eq!(loader.loads.load(Ordering::SeqCst), 1);

    let state = provider.state();
    assert!(state.is_initialized);
    let loaded = state.model.unwrap();
    assert!(loaded.starts_with("model-"), "unexpected model: {}", loaded);
}

#[tokio::test]
async fn test_failed_initialization_is_retryable() {
    let loader = Arc::new(StubLoader::failing_once());
    let provider = EmbeddingProvider::new(loader.clone());
    let options = EmbeddingOptions::default();

    let first = provider.embed_one("hello", &options).await;
    assert!(first.is_err());
    assert!(!provider.state().is_initialized);

    // The failed load must not poison the slot
    let second = provider.embed_one("hello", &options).await;
    assert!(second.is_ok());
    assert_eq!(loader.loads.load(Ordering::SeqCst), 2);
    assert!(provider.state().is_initialized);
}

#[tokio::test]
async fn test_model_name_ignored_after_first_load() {
    let loader = Arc::new(StubLoader::new());
    let provider = EmbeddingProvider::new(loader.clone());

    provider
        .embed_one("first", &options_for("model-one"))
        .await
        .unwrap();
    provider
        .embed_one("second", &options_for("model-two"))
        .await
        .unwrap();

    assert_eq!(loader.loads.load(Ordering::SeqCst), 1);
    assert_eq!(provider.state().model.as_deref(), Some("model-one"));
}

#[tokio::test]
async fn test_embed_many_matches_input_order() {
    let loader = Arc::new(StubLoader::new());
    let provider = EmbeddingProvider::new(loader);

    let texts = vec!["a".to_string(), "ccc".to_string(), "bb".to_string()];
    let vectors = provider
        .embed_many(&texts, &EmbeddingOptions::default())
        .await
        .unwrap();

    // StubBackend encodes the text length into the first component
    assert_eq!(vectors.len(), 3);
    assert_eq!(vectors[0][0], 1.0);
    assert_eq!(vectors[1][0], 3.0);
    assert_eq!(vectors[2][0], 2.0);
}

/// Backend that returns one extra vector per call, violating the
/// one-vector-per-text contract.
struct OverReturningBackend;

#[async_trait]
impl EmbeddingBackend for OverReturningBackend {
    async fn embed(
        &self,
        texts: &[String],
        _pooling: Pooling,
        _normalize: bool,
    ) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Ok((0..texts.len() + 1).map(|_| vec![1.0, 0.0]).collect())
    }

    fn is_ready(&self) -> bool {
        true
    }

    fn dimension(&self) -> usize {
        2
    }

    fn model_name(&self) -> &str {
        "stub/over-returning"
    }
}

struct OverReturningLoader;

#[async_trait]
impl BackendLoader for OverReturningLoader {
    async fn load(&self, _model: &str) -> Result<Arc<dyn EmbeddingBackend>, EmbeddingError> {
        Ok(Arc::new(OverReturningBackend))
    }
}

#[tokio::test]
async fn test_embed_one_rejects_extra_backend_vectors() {
    let provider = EmbeddingProvider::new(Arc::new(OverReturningLoader));
    let options = EmbeddingOptions::default();

    // Two vectors for one text must be an error, not a silent pick
    let one = provider.embed_one("hello", &options).await;
    assert!(matches!(one, Err(EmbeddingError::Inference(_))));

    let many = provider
        .embed_many(&["a".to_string(), "b".to_string()], &options)
        .await;
    assert!(matches!(many, Err(EmbeddingError::Inference(_))));
}

#[tokio::test]
async fn test_state_never_triggers_a_load() {
    let loader = Arc::new(StubLoader::new());
    let provider = EmbeddingProvider::new(loader.clone());

    let state = provider.state();
    assert!(!state.is_initialized);
    assert!(state.model.is_none());
    assert_eq!(loader.loads.load(Ordering::SeqCst), 0);
}
