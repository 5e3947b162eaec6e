// SPDX-License-Identifier: Apache-2.0

use clap::Args;
use std::path::PathBuf;
use std::time::Duration;

use crate::elastic::config::ElasticConfig;
use crate::ingest::config::IngestConfig;

#[derive(Debug, Args, Clone)]
pub struct ElasticArgs {
    /// Base URL of the Elasticsearch-compatible backend
    #[arg(
        long,
        env = "LOGSHIP_ELASTIC_ENDPOINT",
        default_value = "http://localhost:9200"
    )]
    pub elastic_endpoint: String,

    /// Optional basic-auth username for the backend
    #[arg(long, env = "LOGSHIP_ELASTIC_USERNAME")]
    pub elastic_username: Option<String>,

    /// Optional basic-auth password for the backend
    #[arg(long, env = "LOGSHIP_ELASTIC_PASSWORD")]
    pub elastic_password: Option<String>,

    /// Index where log documents are stored
    #[arg(
        long,
        env = "LOGSHIP_ELASTIC_INDEX",
        default_value = "application-logs"
    )]
    pub elastic_index: String,

    /// Master toggle; when false both ingestion and search short-circuit
    #[arg(long, env = "LOGSHIP_ELASTIC_ENABLED", default_value = "false")]
    pub elastic_enabled: bool,

    /// Ship new log lines to the backend
    #[arg(
        long,
        env = "LOGSHIP_ELASTIC_INGEST_ENABLED",
        default_value = "true"
    )]
    pub elastic_ingest_enabled: bool,

    /// Allow search requests against the backend
    #[arg(
        long,
        env = "LOGSHIP_ELASTIC_SEARCH_ENABLED",
        default_value = "true"
    )]
    pub elastic_search_enabled: bool,

    /// Request timeout in milliseconds for backend calls
    #[arg(
        long,
        env = "LOGSHIP_ELASTIC_REQUEST_TIMEOUT_MS",
        default_value = "10000"
    )]
    pub elastic_request_timeout_ms: u64,
}

impl ElasticArgs {
    /// Build the backend config from command line args
    pub fn build_config(&self) -> ElasticConfig {
        ElasticConfig {
            endpoint: self.elastic_endpoint.clone(),
            username: self.elastic_username.clone(),
            password: self.elastic_password.clone(),
            index: self.elastic_index.clone(),
            enabled: self.elastic_enabled,
            ingest_enabled: self.elastic_ingest_enabled,
            search_enabled: self.elastic_search_enabled,
            request_timeout: Duration::from_millis(self.elastic_request_timeout_ms),
        }
    }
}

#[derive(Debug, Args, Clone)]
pub struct IngestArgs {
    /// Enable the log ingestion scheduler
    #[arg(long, env = "LOGSHIP_INGEST_ENABLED", default_value = "false")]
    pub ingest_enabled: bool,

    /// Comma-separated paths of log files to tail
    #[arg(
        long,
        env = "LOGSHIP_INGEST_PATHS",
        value_delimiter = ',',
        default_value = "logs/application.log"
    )]
    pub ingest_paths: Vec<PathBuf>,

    /// Maximum number of documents per bulk request
    #[arg(long, env = "LOGSHIP_INGEST_BULK_SIZE", default_value = "200")]
    pub ingest_bulk_size: usize,

    /// Seconds between ingestion passes, measured from the end of one pass
    /// to the start of the next
    #[arg(
        long,
        env = "LOGSHIP_INGEST_POLL_INTERVAL_SECS",
        default_value = "30"
    )]
    pub ingest_poll_interval_secs: u64,

    /// Seconds to wait before the first ingestion pass
    #[arg(
        long,
        env = "LOGSHIP_INGEST_INITIAL_DELAY_SECS",
        default_value = "5"
    )]
    pub ingest_initial_delay_secs: u64,
}

impl IngestArgs {
    /// Build the ingestion config from command line args
    pub fn build_config(&self) -> IngestConfig {
        IngestConfig {
            enabled: self.ingest_enabled,
            paths: self.ingest_paths.clone(),
            bulk_size: self.ingest_bulk_size,
            poll_interval: Duration::from_secs(self.ingest_poll_interval_secs),
            initial_delay: Duration::from_secs(self.ingest_initial_delay_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(flatten)]
        elastic: ElasticArgs,
        #[command(flatten)]
        ingest: IngestArgs,
    }

    #[test]
    fn defaults_mirror_the_config_defaults() {
        let cli = TestCli::parse_from(["logship"]);
        let elastic = cli.elastic.build_config();
        assert_eq!(elastic.endpoint, "http://localhost:9200");
        assert_eq!(elastic.index, "application-logs");
        assert!(!elastic.enabled);
        assert!(elastic.ingest_enabled);
        assert_eq!(elastic.request_timeout, Duration::from_secs(10));

        let ingest = cli.ingest.build_config();
        assert!(!ingest.enabled);
        assert_eq!(ingest.bulk_size, 200);
        assert_eq!(ingest.poll_interval, Duration::from_secs(30));
        assert_eq!(ingest.initial_delay, Duration::from_secs(5));
        assert_eq!(ingest.paths, vec![PathBuf::from("logs/application.log")]);
    }

    #[test]
    fn paths_are_comma_separated() {
        let cli = TestCli::parse_from([
            "logship",
            "--ingest-paths",
            "logs/a.log,logs/b.log",
        ]);
        let ingest = cli.ingest.build_config();
        assert_eq!(
            ingest.paths,
            vec![PathBuf::from("logs/a.log"), PathBuf::from("logs/b.log")]
        );
    }
}
