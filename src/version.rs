// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

/// Crate version reported by /health
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
