// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! POST /v1/embed/batch: many texts in, one vector per text out.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::embed_batch_handler;
pub use request::EmbedBatchRequest;
pub use response::EmbedBatchResponse;
