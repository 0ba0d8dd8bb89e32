// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use embed_node::{
    api::start_server, config::ServiceConfig, embeddings::OnnxBackendLoader, EmbeddingProvider,
};
use std::{env, sync::Arc};
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    println!("🚀 Starting Embedding Node...");
    println!("📦 Version: {}", embed_node::version::VERSION);
    println!();

    let config = ServiceConfig::from_env();
    info!(
        "Configuration: port={}, default model={}, cache dir={}",
        config.api_port,
        config.default_model,
        config.model_cache_dir.display()
    );

    // The backend itself loads lazily on the first embed request; startup
    // only wires the loader so the process comes up fast even when model
    // weights are not downloaded yet.
    let loader = Arc::new(OnnxBackendLoader::new(config.model_cache_dir.clone()));
    let provider = Arc::new(EmbeddingProvider::new(loader));

    let server_config = config.clone();
    let server_provider = provider.clone();
    let server = tokio::spawn(async move {
        if let Err(e) = start_server(&server_config, server_provider).await {
            eprintln!("API server error: {}", e);
        }
    });

    println!("✅ Embedding node ready on port {}", config.api_port);
    println!("   POST /v1/embed");
    println!("   POST /v1/embed/batch");
    println!("   POST /v1/similarity");
    println!("   GET  /v1/model/state");

    signal::ctrl_c().await?;
    info!("Shutdown signal received, stopping");
    server.abort();

    Ok(())
}
