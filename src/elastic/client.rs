// SPDX-License-Identifier: Apache-2.0

//! HTTP client for the search backend, shared by the bulk shipper and the
//! search executor. One request per call, bounded by the configured
//! timeout; failures are returned to the caller and never retried here.

use base64::Engine;
use bytes::Bytes;
use http::{header, Method, Request, Uri};
use http_body_util::{BodyExt, Full};
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client as HyperClient;
use hyper_util::rt::{TokioExecutor, TokioTimer};
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;
use tower::BoxError;

use crate::elastic::config::ElasticConfig;
use crate::ingest::shipper::BulkSink;
use crate::search::executor::SearchSink;

/// Install the process-wide rustls crypto provider. Safe to call more than
/// once.
pub fn init_crypto_provider() -> Result<(), BoxError> {
    if rustls::crypto::CryptoProvider::get_default().is_none() {
        return match rustls::crypto::aws_lc_rs::default_provider().install_default() {
            Ok(_) => Ok(()),
            Err(e) => Err(format!("failed to initialize crypto library: {:?}", e).into()),
        };
    }
    Ok(())
}

#[derive(Clone)]
pub struct ElasticClient {
    client: HyperClient<HttpsConnector<HttpConnector>, Full<Bytes>>,
    endpoint: String,
    authorization: Option<String>,
    request_timeout: Duration,
}

impl ElasticClient {
    pub fn new(config: &ElasticConfig) -> Result<Self, BoxError> {
        config.validate().map_err(BoxError::from)?;

        let https = hyper_rustls::HttpsConnectorBuilder::new()
            .with_native_roots()?
            .https_or_http()
            .enable_http1()
            .build();

        let client = HyperClient::builder(TokioExecutor::new())
            .pool_idle_timeout(Duration::from_secs(30))
            .timer(TokioTimer::new())
            .build::<_, Full<Bytes>>(https);

        let authorization = config.username.as_ref().map(|user| {
            let credentials = format!("{}:{}", user, config.password.as_deref().unwrap_or(""));
            let token = base64::engine::general_purpose::STANDARD.encode(credentials);
            format!("Basic {}", token)
        });

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            authorization,
            request_timeout: config.request_timeout,
        })
    }

    /// POST a bulk NDJSON payload to the backend's bulk endpoint.
    pub async fn bulk(&self, body: Bytes) -> Result<(), BoxError> {
        self.post("/_bulk?refresh=false", "application/x-ndjson", body)
            .await
            .map(|_| ())
    }

    /// POST a search payload against an index and return the parsed body.
    pub async fn search_index(
        &self,
        index: &str,
        payload: serde_json::Value,
    ) -> Result<serde_json::Value, BoxError> {
        let body = serde_json::to_vec(&payload)?;
        let path = format!("/{}/_search", index);
        let response = self
            .post(&path, "application/json", Bytes::from(body))
            .await?;
        if response.is_empty() {
            return Err("backend returned an empty response".into());
        }
        Ok(serde_json::from_slice(&response)?)
    }

    async fn post(
        &self,
        path: &str,
        content_type: &'static str,
        body: Bytes,
    ) -> Result<Bytes, BoxError> {
        let uri: Uri = format!("{}{}", self.endpoint, path).parse()?;

        let mut builder = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, content_type);
        if let Some(authorization) = &self.authorization {
            builder = builder.header(header::AUTHORIZATION, authorization.clone());
        }
        let request = builder.body(Full::new(body))?;

        let response = timeout(self.request_timeout, self.client.request(request))
            .await
            .map_err(|_| format!("request to {} timed out", path))??;

        let status = response.status();
        let body = timeout(self.request_timeout, response.into_body().collect())
            .await
            .map_err(|_| format!("reading response from {} timed out", path))??
            .to_bytes();

        if !status.is_success() {
            return Err(format!(
                "backend returned status {}: {}",
                status,
                String::from_utf8_lossy(&body)
            )
            .into());
        }
        Ok(body)
    }
}

impl BulkSink for ElasticClient {
    fn send_bulk(&self, body: Bytes) -> impl Future<Output = Result<(), BoxError>> + Send {
        self.bulk(body)
    }
}

impl SearchSink for ElasticClient {
    fn search(
        &self,
        index: &str,
        payload: serde_json::Value,
    ) -> impl Future<Output = Result<serde_json::Value, BoxError>> + Send {
        self.search_index(index, payload)
    }
}
