// SPDX-License-Identifier: Apache-2.0

//! Wires validated configuration into the running agent: backend client,
//! ingestion loop, and shutdown.

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tower::BoxError;
use tracing::info;

use crate::elastic::client::ElasticClient;
use crate::elastic::config::ElasticConfig;
use crate::ingest::config::IngestConfig;
use crate::ingest::ingestor::Ingestor;

pub struct Agent {
    elastic: ElasticConfig,
    ingest: IngestConfig,
}

impl Agent {
    pub fn new(elastic: ElasticConfig, ingest: IngestConfig) -> Self {
        Self { elastic, ingest }
    }

    /// Run until the cancellation token fires, then drain the ingestion
    /// task.
    pub async fn run(self, cancel: CancellationToken) -> Result<(), BoxError> {
        self.elastic.validate().map_err(BoxError::from)?;
        self.ingest.validate().map_err(BoxError::from)?;

        let client = ElasticClient::new(&self.elastic)?;
        let ingestor = Ingestor::new(
            self.ingest,
            self.elastic.ingest_active(),
            client,
            self.elastic.index.clone(),
        );

        info!(
            endpoint = %self.elastic.endpoint,
            index = %self.elastic.index,
            "agent started"
        );

        let mut tasks = JoinSet::new();
        tasks.spawn(ingestor.run(cancel.clone()));

        cancel.cancelled().await;
        while tasks.join_next().await.is_some() {}

        info!("agent stopped");
        Ok(())
    }
}
