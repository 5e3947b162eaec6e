// SPDX-License-Identifier: Apache-2.0

use serde::Deserialize;

const DEFAULT_SIZE: u64 = 20;
const MAX_SIZE: u64 = 200;

/// A log search request: the raw DSL query plus pagination. `from` and
/// `size` are optional; resolution applies defaults and clamps.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub from: Option<u64>,
    #[serde(default)]
    pub size: Option<u64>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            from: None,
            size: None,
        }
    }

    /// Offset into the result set, defaulting to 0.
    pub fn resolve_from(&self) -> u64 {
        self.from.unwrap_or(0)
    }

    /// Page size, defaulting to 20 and clamped to 1..=200 regardless of the
    /// caller's input.
    pub fn resolve_size(&self) -> u64 {
        self.size.unwrap_or(DEFAULT_SIZE).clamp(1, MAX_SIZE)
    }
}
