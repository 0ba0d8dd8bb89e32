// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! EmbedRequest type for the POST /v1/embed endpoint.

use serde::{Deserialize, Serialize};

use crate::api::ApiError;
use crate::embeddings::{EmbeddingOptions, Pooling, DEFAULT_MODEL};

/// Maximum accepted text length in characters
pub const MAX_TEXT_CHARS: usize = 8192;

/// Request body for POST /v1/embed
///
/// # Example
/// ```json
/// {
///   "text": "Hello world",
///   "model": "Xenova/all-MiniLM-L6-v2",
///   "pooling": "mean",
///   "normalize": true
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedRequest {
    /// Text to embed
    pub text: String,

    /// Embedding model id; only honored by the first embed request of the
    /// process (the backend is a singleton)
    #[serde(default = "default_model")]
    pub model: String,

    /// Token pooling strategy
    #[serde(default)]
    pub pooling: Pooling,

    /// Whether the returned vector is scaled to unit norm
    #[serde(default = "default_normalize")]
    pub normalize: bool,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_normalize() -> bool {
    true
}

/// Shared text validation used by all text-carrying endpoints
pub(crate) fn validate_text(field: &str, text: &str) -> Result<(), ApiError> {
    if text.trim().is_empty() {
        return Err(ApiError::ValidationError {
            field: field.to_string(),
            message: "text cannot be empty or contain only whitespace".to_string(),
        });
    }

    if text.len() > MAX_TEXT_CHARS {
        return Err(ApiError::ValidationError {
            field: field.to_string(),
            message: format!(
                "text cannot exceed {} characters (got {} characters)",
                MAX_TEXT_CHARS,
                text.len()
            ),
        });
    }

    Ok(())
}

pub(crate) fn validate_model(model: &str) -> Result<(), ApiError> {
    if model.trim().is_empty() {
        return Err(ApiError::ValidationError {
            field: "model".to_string(),
            message: "model name cannot be empty".to_string(),
        });
    }
    Ok(())
}

impl EmbedRequest {
    /// Validates the request before any backend call is made.
    pub fn validate(&self) -> Result<(), ApiError> {
        validate_text("text", &self.text)?;
        validate_model(&self.model)
    }

    pub fn options(&self) -> EmbeddingOptions {
        EmbeddingOptions {
            model: self.model.clone(),
            pooling: self.pooling,
            normalize: self.normalize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialization_with_defaults() {
        let json = r#"{"text": "hello"}"#;
        let req: EmbedRequest = serde_json::from_str(json).unwrap();

        assert_eq!(req.text, "hello");
        assert_eq!(req.model, "Xenova/all-MiniLM-L6-v2");
        assert_eq!(req.pooling, Pooling::Mean);
        assert!(req.normalize);
    }

    #[test]
    fn test_empty_text_rejected() {
        let req = EmbedRequest {
            text: "   ".to_string(),
            model: default_model(),
            pooling: Pooling::Mean,
            normalize: true,
        };

        let err = req.validate().unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_oversized_text_rejected() {
        let req = EmbedRequest {
            text: "x".repeat(MAX_TEXT_CHARS + 1),
            model: default_model(),
            pooling: Pooling::Mean,
            normalize: true,
        };

        assert!(req.validate().is_err());
    }
}
