// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;

/// Connection and feature configuration for the search backend.
#[derive(Debug, Clone)]
pub struct ElasticConfig {
    /// Base URL of the backend, e.g. `http://localhost:9200`.
    pub endpoint: String,
    /// Optional basic-auth username.
    pub username: Option<String>,
    /// Optional basic-auth password.
    pub password: Option<String>,
    /// Index where log documents are stored.
    pub index: String,
    /// Master toggle; when off both ingestion and search short-circuit.
    pub enabled: bool,
    /// Ship new log lines to the backend.
    pub ingest_enabled: bool,
    /// Allow search requests against the backend.
    pub search_enabled: bool,
    /// Bound on each backend request, connect included.
    pub request_timeout: Duration,
}

impl Default for ElasticConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:9200".to_string(),
            username: None,
            password: None,
            index: "application-logs".to_string(),
            enabled: false,
            ingest_enabled: true,
            search_enabled: true,
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl ElasticConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.endpoint.is_empty() {
            return Err("backend endpoint must not be empty".to_string());
        }
        if self.index.is_empty() {
            return Err("index name must not be empty".to_string());
        }
        self.endpoint
            .parse::<http::Uri>()
            .map_err(|e| format!("invalid backend endpoint: {}", e))?;
        Ok(())
    }

    /// Whether ingestion should ship to the backend at all.
    pub fn ingest_active(&self) -> bool {
        self.enabled && self.ingest_enabled
    }

    /// Whether search requests may be executed.
    pub fn search_active(&self) -> bool {
        self.enabled && self.search_enabled
    }
}
