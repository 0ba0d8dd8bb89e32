// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! ONNX Runtime embedding backend.
//!
//! Wraps an ONNX sentence-transformer session (all-MiniLM-L6-v2 by default)
//! behind the [`EmbeddingBackend`] trait:
//! - BERT tokenization with per-batch padding
//! - CUDA execution provider with automatic CPU fallback
//! - mean or CLS pooling over token embeddings, selected per call
//! - optional L2 normalization of the pooled vector
//!
//! The output dimension is discovered from a validation inference at load
//! time rather than assumed, so non-384-dimensional conversions work too.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ndarray::{Array2, ArrayView2, Axis};
use ort::ep::{CPU, CUDA};
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Value;
use tokenizers::Tokenizer;
use tracing::{info, warn};

use super::fetcher::fetch_model_files;
use super::{BackendLoader, EmbeddingBackend, EmbeddingError, Pooling};

/// ONNX-based embedding model
///
/// # Thread Safety
/// The session sits behind `Arc<Mutex>` so one instance can be shared by
/// every in-flight request; inference calls serialize on the session lock.
#[derive(Clone)]
pub struct OnnxEmbeddingModel {
    session: Arc<Mutex<Session>>,
    tokenizer: Arc<Tokenizer>,
    model_name: String,
    dimension: usize,
}

impl std::fmt::Debug for OnnxEmbeddingModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxEmbeddingModel")
            .field("model_name", &self.model_name)
            .field("dimension", &self.dimension)
            .finish_non_exhaustive()
    }
}

impl OnnxEmbeddingModel {
    /// Creates a backend from ONNX weights and a tokenizer file on disk.
    ///
    /// Tries the CUDA execution provider first and falls back to CPU. Runs
    /// one validation inference to learn the model's output dimension and
    /// reject models that do not produce `[batch, seq_len, hidden]` output.
    pub async fn new<P: AsRef<Path>>(
        model_name: impl Into<String>,
        model_path: P,
        tokenizer_path: P,
    ) -> Result<Self, EmbeddingError> {
        let model_name = model_name.into();
        let model_path = model_path.as_ref();
        let tokenizer_path = tokenizer_path.as_ref();

        if !model_path.exists() {
            return Err(EmbeddingError::ModelLoad(format!(
                "ONNX model file not found: {}",
                model_path.display()
            )));
        }
        if !tokenizer_path.exists() {
            return Err(EmbeddingError::ModelLoad(format!(
                "tokenizer file not found: {}",
                tokenizer_path.display()
            )));
        }

        info!("🚀 Initializing ONNX embedding model: {}", model_name);

        let cuda_result = Self::session_builder()?
            .with_execution_providers([CUDA::default().build()])
            .map_err(|e| EmbeddingError::ModelLoad(format!("CUDA provider setup failed: {}", e)))?
            .commit_from_file(model_path);

        let mut session = match cuda_result {
            Ok(s) => {
                info!("✅ CUDA execution provider initialized");
                s
            }
            Err(e) => {
                warn!("⚠️  CUDA execution provider unavailable: {}", e);
                warn!("   Falling back to CPU execution provider");
                Self::session_builder()?
                    .with_execution_providers([CPU::default().build()])
                    .map_err(|e| {
                        EmbeddingError::ModelLoad(format!("CPU provider setup failed: {}", e))
                    })?
                    .commit_from_file(model_path)
                    .map_err(|e| {
                        EmbeddingError::ModelLoad(format!(
                            "failed to load ONNX model from {}: {}",
                            model_path.display(),
                            e
                        ))
                    })?
            }
        };

        let tokenizer = Tokenizer::from_file(tokenizer_path)
            .map_err(|e| EmbeddingError::ModelLoad(format!("failed to load tokenizer: {}", e)))?;

        // Validation inference: learn the output dimension and reject models
        // that don't emit token-level [batch, seq_len, hidden] embeddings.
        let dimension = {
            let encoding = tokenizer
                .encode("validation test", true)
                .map_err(|e| EmbeddingError::ModelLoad(format!("tokenizer validation: {}", e)))?;

            let seq_len = encoding.get_ids().len();
            let input_ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
            let attention_mask: Vec<i64> = encoding
                .get_attention_mask()
                .iter()
                .map(|&m| m as i64)
                .collect();

            let (ids, mask, type_ids) = build_inputs(1, seq_len, input_ids, attention_mask)?;
            let outputs = session
                .run(ort::inputs![
                    "input_ids" => ids,
                    "attention_mask" => mask,
                    "token_type_ids" => type_ids
                ])
                .map_err(|e| {
                    EmbeddingError::ModelLoad(format!("validation inference failed: {}", e))
                })?;
            let output_array = outputs[0].try_extract_array::<f32>().map_err(|e| {
                EmbeddingError::ModelLoad(format!("failed to extract output tensor: {}", e))
            })?;
            let shape = output_array.shape();

            if shape.len() != 3 {
                return Err(EmbeddingError::ModelLoad(format!(
                    "model outputs unexpected shape {:?} (expected [batch, seq_len, hidden])",
                    shape
                )));
            }
            shape[2]
        };

        info!(
            "✅ ONNX embedding model loaded: {} ({} dimensions)",
            model_name, dimension
        );

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            tokenizer: Arc::new(tokenizer),
            model_name,
            dimension,
        })
    }

    fn session_builder() -> Result<ort::session::builder::SessionBuilder, EmbeddingError> {
        Session::builder()
            .map_err(|e| EmbeddingError::ModelLoad(format!("session builder failed: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .and_then(|b| b.with_intra_threads(4))
            .map_err(|e| EmbeddingError::ModelLoad(format!("session builder failed: {}", e)))
    }

    /// Pools one batch item's token embeddings into a sentence vector.
    ///
    /// Mean pooling weights each token by its attention mask so padding
    /// does not dilute the average; CLS pooling takes token 0.
    fn pool(token_embeddings: ArrayView2<f32>, mask: &[i64], pooling: Pooling) -> Vec<f32> {
        let seq_len = token_embeddings.shape()[0];
        let hidden_dim = token_embeddings.shape()[1];

        match pooling {
            Pooling::Cls => token_embeddings.row(0).to_vec(),
            Pooling::Mean => {
                let mut pooled = vec![0.0f32; hidden_dim];
                let mut sum_mask = 0.0f32;

                for i in 0..seq_len {
                    let mask_value = mask[i] as f32;
                    sum_mask += mask_value;
                    for j in 0..hidden_dim {
                        pooled[j] += token_embeddings[[i, j]] * mask_value;
                    }
                }

                for val in &mut pooled {
                    *val /= sum_mask.max(1e-9);
                }

                pooled
            }
        }
    }

    fn normalize_in_place(v: &mut [f32]) {
        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in v {
                *value /= norm;
            }
        }
    }
}

type InputTensor = ort::value::Tensor<i64>;

/// Builds the three BERT input tensors (`input_ids`, `attention_mask`,
/// `token_type_ids`) for one `[batch, seq_len]` call. Token type ids are
/// all zeros for single-segment embedding input.
fn build_inputs(
    batch: usize,
    seq_len: usize,
    input_ids: Vec<i64>,
    attention_mask: Vec<i64>,
) -> Result<(InputTensor, InputTensor, InputTensor), EmbeddingError> {
    let token_type_ids = vec![0i64; input_ids.len()];

    let input_ids_array = Array2::from_shape_vec((batch, seq_len), input_ids)
        .map_err(|e| EmbeddingError::Inference(format!("input_ids shape: {}", e)))?;
    let attention_mask_array = Array2::from_shape_vec((batch, seq_len), attention_mask)
        .map_err(|e| EmbeddingError::Inference(format!("attention_mask shape: {}", e)))?;
    let token_type_ids_array = Array2::from_shape_vec((batch, seq_len), token_type_ids)
        .map_err(|e| EmbeddingError::Inference(format!("token_type_ids shape: {}", e)))?;

    let to_value = |a: Array2<i64>| {
        Value::from_array(a).map_err(|e| EmbeddingError::Inference(format!("tensor build: {}", e)))
    };

    Ok((
        to_value(input_ids_array)?,
        to_value(attention_mask_array)?,
        to_value(token_type_ids_array)?,
    ))
}

#[async_trait]
impl EmbeddingBackend for OnnxEmbeddingModel {
    async fn embed(
        &self,
        texts: &[String],
        pooling: Pooling,
        normalize: bool,
    ) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let encodings: Vec<_> = texts
            .iter()
            .map(|text| {
                self.tokenizer
                    .encode(text.as_str(), true)
                    .map_err(|e| EmbeddingError::Tokenization(e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        // Pad all sequences to the batch max so one session call covers
        // the whole batch
        let max_len = encodings
            .iter()
            .map(|enc| enc.get_ids().len())
            .max()
            .unwrap_or(0);

        let mut input_ids_batch = Vec::with_capacity(texts.len() * max_len);
        let mut attention_mask_batch = Vec::with_capacity(texts.len() * max_len);

        for encoding in &encodings {
            let ids = encoding.get_ids();
            let mask = encoding.get_attention_mask();

            input_ids_batch.extend(ids.iter().map(|&id| id as i64));
            attention_mask_batch.extend(mask.iter().map(|&m| m as i64));

            let padding_needed = max_len - ids.len();
            input_ids_batch.extend(std::iter::repeat(0i64).take(padding_needed));
            attention_mask_batch.extend(std::iter::repeat(0i64).take(padding_needed));
        }

        let attention_mask_for_pooling = attention_mask_batch.clone();

        let (ids, mask, type_ids) =
            build_inputs(texts.len(), max_len, input_ids_batch, attention_mask_batch)?;

        let mut session_guard = self.session.lock().unwrap();
        let outputs = session_guard
            .run(ort::inputs![
                "input_ids" => ids,
                "attention_mask" => mask,
                "token_type_ids" => type_ids
            ])
            .map_err(|e| EmbeddingError::Inference(format!("session run failed: {}", e)))?;

        let output_array = outputs[0].try_extract_array::<f32>().map_err(|e| {
            EmbeddingError::Inference(format!("failed to extract output tensor: {}", e))
        })?;

        let mut embeddings: Vec<Vec<f32>> = Vec::with_capacity(texts.len());

        for batch_idx in 0..texts.len() {
            let token_embeddings = output_array
                .index_axis(Axis(0), batch_idx)
                .into_dimensionality::<ndarray::Ix2>()
                .map_err(|e| {
                    EmbeddingError::Inference(format!("unexpected output shape: {}", e))
                })?;
            let mask_start = batch_idx * max_len;
            let item_mask = &attention_mask_for_pooling[mask_start..mask_start + max_len];

            let mut pooled = Self::pool(token_embeddings, item_mask, pooling);
            if normalize {
                Self::normalize_in_place(&mut pooled);
            }

            if pooled.len() != self.dimension {
                return Err(EmbeddingError::DimensionMismatch {
                    got: pooled.len(),
                    expected: self.dimension,
                });
            }

            embeddings.push(pooled);
        }

        Ok(embeddings)
    }

    fn is_ready(&self) -> bool {
        true
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

/// Production [`BackendLoader`]: hub fetch + ONNX session construction
pub struct OnnxBackendLoader {
    cache_dir: std::path::PathBuf,
}

impl OnnxBackendLoader {
    pub fn new(cache_dir: impl Into<std::path::PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }
}

#[async_trait]
impl BackendLoader for OnnxBackendLoader {
    async fn load(&self, model: &str) -> Result<Arc<dyn EmbeddingBackend>, EmbeddingError> {
        let files = fetch_model_files(model, &self.cache_dir).await?;
        let backend =
            OnnxEmbeddingModel::new(model, &files.model_path, &files.tokenizer_path).await?;
        Ok(Arc::new(backend))
    }
}
