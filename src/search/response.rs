// SPDX-License-Identifier: Apache-2.0

//! Result types returned to callers, plus the wire-shape structs the raw
//! backend response is deserialized through. Every wire field defaults, so
//! a sparse or partial backend response maps cleanly instead of failing.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single search hit mapped from the backend response.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchHit {
    pub id: Option<String>,
    pub score: Option<f64>,
    pub timestamp: Option<String>,
    pub level: Option<String>,
    pub message: Option<String>,
    pub raw: Option<String>,
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<String>,
}

/// Search results returned to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub total: u64,
    pub took: u64,
    pub translated_query: String,
    pub hits: Vec<SearchHit>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WireResponse {
    #[serde(default)]
    pub took: u64,
    #[serde(default)]
    pub hits: WireHits,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WireHits {
    #[serde(default)]
    pub total: WireTotal,
    #[serde(default)]
    pub hits: Vec<WireHit>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WireTotal {
    #[serde(default)]
    pub value: u64,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WireHit {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(rename = "_score", default)]
    pub score: Option<f64>,
    #[serde(rename = "_source", default)]
    pub source: WireSource,
    #[serde(default)]
    pub highlight: HashMap<String, Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WireSource {
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub raw: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

impl From<WireHit> for SearchHit {
    fn from(hit: WireHit) -> Self {
        // Prefer a message excerpt, fall back to a raw excerpt.
        let highlight = first_fragment(&hit.highlight, "message")
            .or_else(|| first_fragment(&hit.highlight, "raw"));
        SearchHit {
            id: hit.id,
            score: hit.score,
            timestamp: hit.source.timestamp,
            level: hit.source.level,
            message: hit.source.message,
            raw: hit.source.raw,
            source: hit.source.source,
            highlight,
        }
    }
}

fn first_fragment(highlight: &HashMap<String, Vec<String>>, field: &str) -> Option<String> {
    highlight.get(field).and_then(|fragments| fragments.first()).cloned()
}
