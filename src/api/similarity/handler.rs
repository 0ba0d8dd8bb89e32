// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! POST /v1/similarity HTTP handler.

use axum::extract::State;
use axum::Json;
use tracing::debug;

use crate::api::http_server::AppState;
use crate::api::similarity::{similarity_label, SimilarityRequest, SimilarityResponse};
use crate::api::ApiError;
use crate::vector::cosine_similarity;

/// POST /v1/similarity handler
///
/// Embeds both texts in one backend batch call, then compares the vectors
/// with cosine similarity.
pub async fn similarity_handler(
    State(state): State<AppState>,
    Json(request): Json<SimilarityRequest>,
) -> Result<Json<SimilarityResponse>, ApiError> {
    request.validate()?;

    let options = request.options();
    let texts = [request.text_a.clone(), request.text_b.clone()];
    let vectors = state.provider.embed_many(&texts, &options).await?;

    let similarity = cosine_similarity(&vectors[0], &vectors[1])?;
    let label = similarity_label(similarity);

    debug!("Similarity {:.4} ({})", similarity, label);

    let model = state
        .provider
        .state()
        .model
        .unwrap_or_else(|| options.model.clone());

    Ok(Json(SimilarityResponse {
        similarity,
        label: label.to_string(),
        model,
    }))
}
