// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Model file resolution via the HuggingFace Hub.
//!
//! Given a model id like "Xenova/all-MiniLM-L6-v2", downloads (or reuses
//! from the local cache) the ONNX weights and tokenizer definition the
//! backend needs. Downloads happen once per model per cache directory;
//! repeated loads hit the cache.

use std::path::{Path, PathBuf};

use hf_hub::api::tokio::ApiBuilder;
use tracing::info;

use super::EmbeddingError;

/// Local paths to a model's files after resolution
#[derive(Debug, Clone)]
pub struct ModelFiles {
    pub model_path: PathBuf,
    pub tokenizer_path: PathBuf,
}

/// Resolves a model id to local ONNX + tokenizer files.
///
/// Xenova-converted repos keep the weights at `onnx/model.onnx`; other
/// conversions place `model.onnx` at the repo root, so both locations are
/// tried in that order.
///
/// # Errors
/// [`EmbeddingError::ModelLoad`] if the repo is unknown, the network fetch
/// fails, or neither weight location exists.
pub async fn fetch_model_files(
    model: &str,
    cache_dir: &Path,
) -> Result<ModelFiles, EmbeddingError> {
    let api = ApiBuilder::new()
        .with_cache_dir(cache_dir.to_path_buf())
        .build()
        .map_err(|e| EmbeddingError::ModelLoad(format!("hub client init failed: {}", e)))?;

    let repo = api.model(model.to_string());

    info!("📥 Resolving model files for {}", model);

    let model_path = match repo.get("onnx/model.onnx").await {
        Ok(path) => path,
        Err(_) => repo.get("model.onnx").await.map_err(|e| {
            EmbeddingError::ModelLoad(format!(
                "failed to fetch ONNX weights for {}: {}",
                model, e
            ))
        })?,
    };

    let tokenizer_path = repo.get("tokenizer.json").await.map_err(|e| {
        EmbeddingError::ModelLoad(format!("failed to fetch tokenizer for {}: {}", model, e))
    })?;

    info!(
        "✅ Model files ready: {} / {}",
        model_path.display(),
        tokenizer_path.display()
    );

    Ok(ModelFiles {
        model_path,
        tokenizer_path,
    })
}
