// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! POST /v1/embed HTTP handler.

use axum::extract::State;
use axum::Json;
use tracing::debug;

use crate::api::embed::{EmbedRequest, EmbedResponse};
use crate::api::http_server::AppState;
use crate::api::ApiError;

/// POST /v1/embed handler
///
/// Validates the request, ensures the backend is initialized (first call
/// pays the model-load cost), and returns one vector.
pub async fn embed_handler(
    State(state): State<AppState>,
    Json(request): Json<EmbedRequest>,
) -> Result<Json<EmbedResponse>, ApiError> {
    request.validate()?;

    let options = request.options();
    let embedding = state.provider.embed_one(&request.text, &options).await?;

    debug!(
        "Embedded 1 text ({} chars) -> {} dimensions",
        request.text.len(),
        embedding.len()
    );

    let model = state
        .provider
        .state()
        .model
        .unwrap_or_else(|| options.model.clone());

    Ok(Json(EmbedResponse {
        dimensions: embedding.len(),
        embedding,
        model,
    }))
}
