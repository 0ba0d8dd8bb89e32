// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! POST /v1/embed/batch HTTP handler.

use axum::extract::State;
use axum::Json;
use tracing::debug;

use crate::api::embed_batch::{EmbedBatchRequest, EmbedBatchResponse};
use crate::api::http_server::AppState;
use crate::api::ApiError;

/// POST /v1/embed/batch handler
///
/// One backend call for the whole batch; output order equals input order.
pub async fn embed_batch_handler(
    State(state): State<AppState>,
    Json(request): Json<EmbedBatchRequest>,
) -> Result<Json<EmbedBatchResponse>, ApiError> {
    request.validate()?;

    let options = request.options();
    let embeddings = state.provider.embed_many(&request.texts, &options).await?;

    let dimensions = embeddings.first().map(|v| v.len()).unwrap_or(0);

    debug!(
        "Embedded {} texts -> {} dimensions",
        embeddings.len(),
        dimensions
    );

    let model = state
        .provider
        .state()
        .model
        .unwrap_or_else(|| options.model.clone());

    Ok(Json(EmbedBatchResponse {
        count: embeddings.len(),
        dimensions,
        embeddings,
        model,
    }))
}
