// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod embed;
pub mod embed_batch;
pub mod errors;
pub mod handlers;
pub mod http_server;
pub mod similarity;

pub use embed::{embed_handler, EmbedRequest, EmbedResponse};
pub use embed_batch::{embed_batch_handler, EmbedBatchRequest, EmbedBatchResponse};
pub use errors::{ApiError, ErrorResponse};
pub use handlers::HealthResponse;
pub use http_server::{build_router, start_server, AppState};
pub use similarity::{similarity_handler, SimilarityRequest, SimilarityResponse};
