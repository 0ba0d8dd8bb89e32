// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! axum router and server startup.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::api::embed::embed_handler;
use crate::api::embed_batch::embed_batch_handler;
use crate::api::handlers::{health_handler, model_state_handler};
use crate::api::similarity::similarity_handler;
use crate::config::ServiceConfig;
use crate::embeddings::EmbeddingProvider;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<EmbeddingProvider>,
}

/// Builds the service router. Split from [`start_server`] so tests can
/// drive the router without binding a socket.
pub fn build_router(provider: Arc<EmbeddingProvider>) -> Router {
    let state = AppState { provider };

    Router::new()
        // Health check
        .route("/health", get(health_handler))
        // Embedding endpoints
        .route("/v1/embed", post(embed_handler))
        .route("/v1/embed/batch", post(embed_batch_handler))
        // Similarity endpoint
        .route("/v1/similarity", post(similarity_handler))
        // Backend lifecycle introspection
        .route("/v1/model/state", get(model_state_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Binds the listener and serves requests until the process exits.
pub async fn start_server(
    config: &ServiceConfig,
    provider: Arc<EmbeddingProvider>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(provider);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.api_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("API server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
