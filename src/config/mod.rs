// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Service configuration loaded from environment variables.
//!
//! All settings have defaults so the node starts with no environment at all:
//! - `API_PORT`: HTTP listen port (default 8080)
//! - `EMBEDDING_MODEL`: HuggingFace model id loaded on first embed request
//!   (default "Xenova/all-MiniLM-L6-v2")
//! - `MODEL_CACHE_DIR`: directory for downloaded model files (default "./models")

use std::env;
use std::path::PathBuf;

use crate::embeddings::DEFAULT_MODEL;

/// Runtime configuration for the embedding node
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// HTTP listen port
    pub api_port: u16,
    /// Default model id used when a request does not name one
    pub default_model: String,
    /// Cache directory for model weights and tokenizer files
    pub model_cache_dir: PathBuf,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_port: 8080,
            default_model: DEFAULT_MODEL.to_string(),
            model_cache_dir: PathBuf::from("./models"),
        }
    }
}

impl ServiceConfig {
    /// Builds a config from environment variables, falling back to defaults
    /// for anything unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(defaults.api_port);

        let default_model =
            env::var("EMBEDDING_MODEL").unwrap_or_else(|_| defaults.default_model.clone());

        let model_cache_dir = env::var("MODEL_CACHE_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.model_cache_dir);

        Self {
            api_port,
            default_model,
            model_cache_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServiceConfig::default();
        assert_eq!(config.api_port, 8080);
        assert_eq!(config.default_model, "Xenova/all-MiniLM-L6-v2");
        assert_eq!(config.model_cache_dir, PathBuf::from("./models"));
    }
}
