// SPDX-License-Identifier: Apache-2.0

//! Builds one backend search request per call and maps the raw response.
//!
//! The executor is stateless; calls may run fully concurrently. Backend
//! failures surface as [`SearchError::Backend`], distinct from the
//! client-input [`SearchError::Query`] surface. No retries.

use std::future::Future;
use tower::BoxError;

use crate::query;
use crate::search::error::{Result, SearchError};
use crate::search::request::SearchRequest;
use crate::search::response::{SearchHit, SearchResponse, WireResponse};

/// Seam between the executor and the backend HTTP client (and in-test
/// fakes): run one search against an index, returning the parsed body.
pub trait SearchSink {
    fn search(
        &self,
        index: &str,
        payload: serde_json::Value,
    ) -> impl Future<Output = std::result::Result<serde_json::Value, BoxError>> + Send;
}

impl<S: SearchSink + Sync> SearchSink for &S {
    fn search(
        &self,
        index: &str,
        payload: serde_json::Value,
    ) -> impl Future<Output = std::result::Result<serde_json::Value, BoxError>> + Send {
        (*self).search(index, payload)
    }
}

pub struct SearchExecutor<S> {
    sink: S,
    index: String,
    enabled: bool,
}

impl<S: SearchSink> SearchExecutor<S> {
    /// `enabled` carries the backend toggles; a disabled executor fails
    /// fast without compiling the query.
    pub fn new(sink: S, index: impl Into<String>, enabled: bool) -> Self {
        Self {
            sink,
            index: index.into(),
            enabled,
        }
    }

    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        if !self.enabled {
            return Err(SearchError::Disabled);
        }

        let parsed = query::parse(&request.query)?;
        let payload = build_payload(&parsed.query_string, request);

        let body = self
            .sink
            .search(&self.index, payload)
            .await
            .map_err(|e| SearchError::Backend(e.to_string()))?;

        let wire: WireResponse = serde_json::from_value(body)
            .map_err(|e| SearchError::Backend(format!("unexpected response body: {}", e)))?;

        Ok(SearchResponse {
            total: wire.hits.total.value,
            took: wire.took,
            translated_query: parsed.query_string,
            hits: wire.hits.hits.into_iter().map(SearchHit::from).collect(),
        })
    }
}

/// Assemble the search payload: a free-text query over the translated
/// string with AND as the default conjunction, score-then-timestamp sort,
/// highlighting on `message` and `raw`, and resolved pagination.
fn build_payload(query_string: &str, request: &SearchRequest) -> serde_json::Value {
    serde_json::json!({
        "query": {
            "query_string": {
                "query": query_string,
                "default_operator": "AND"
            }
        },
        "from": request.resolve_from(),
        "size": request.resolve_size(),
        "sort": [
            { "_score": "desc" },
            { "timestamp": "desc" }
        ],
        "highlight": {
            "fields": {
                "message": {},
                "raw": {}
            }
        }
    })
}
