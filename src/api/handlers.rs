// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Read-only endpoints: GET /health and GET /v1/model/state.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::http_server::AppState;
use crate::embeddings::ProviderState;
use crate::version;

/// Response body for GET /health
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// GET /health handler
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: version::VERSION.to_string(),
    })
}

/// GET /v1/model/state handler
///
/// Reports whether the embedding backend has been created yet; never
/// triggers a model load.
pub async fn model_state_handler(State(state): State<AppState>) -> Json<ProviderState> {
    Json(state.provider.state())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_reports_crate_version() {
        let Json(response) = health_handler().await;
        assert_eq!(response.status, "ok");
        assert_eq!(response.version, env!("CARGO_PKG_VERSION"));
    }
}
