// SPDX-License-Identifier: Apache-2.0

//! The ingestion scheduler: a fixed-delay polling loop that drives one
//! sequential tailing pass across all configured paths per tick.

use tokio::select;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::ingest::config::IngestConfig;
use crate::ingest::shipper::{BatchShipper, BulkSink};
use crate::ingest::tailer::FileTailer;

/// Owns the tailer state and the shipper, and drives the polling loop.
///
/// Ticks are strictly serialized: a new tick does not start until the
/// previous one has finished across all paths, so the offset map needs no
/// locking.
pub struct Ingestor<S: BulkSink> {
    config: IngestConfig,
    shipping_enabled: bool,
    tailer: FileTailer,
    shipper: BatchShipper<S>,
}

impl<S: BulkSink> Ingestor<S> {
    /// `shipping_enabled` carries the backend-side toggles; the tick is a
    /// no-op unless both it and the ingestion config are enabled.
    pub fn new(config: IngestConfig, shipping_enabled: bool, sink: S, index: String) -> Self {
        let shipper = BatchShipper::new(sink, index, config.bulk_size);
        Self {
            config,
            shipping_enabled,
            tailer: FileTailer::new(),
            shipper,
        }
    }

    fn enabled(&self) -> bool {
        self.config.enabled && self.shipping_enabled
    }

    /// Run the fixed-delay polling loop until cancelled: initial delay,
    /// then tick, sleep, tick, with the sleep starting only after the tick
    /// completes.
    pub async fn run(mut self, cancel: CancellationToken) {
        if !self.enabled() {
            info!("log ingestion disabled");
        }

        select! {
            _ = cancel.cancelled() => return,
            _ = sleep(self.config.initial_delay) => {}
        }

        loop {
            self.tick().await;
            select! {
                _ = cancel.cancelled() => return,
                _ = sleep(self.config.poll_interval) => {}
            }
        }
    }

    /// One sequential pass over all configured paths. A failing path is
    /// logged and abandoned for this tick; the remaining paths still run.
    pub async fn tick(&mut self) {
        if !self.enabled() {
            return;
        }

        let Self {
            config,
            tailer,
            shipper,
            ..
        } = self;

        for path in &config.paths {
            match tokio::fs::metadata(path).await {
                Err(_) => {
                    debug!(path = %path.display(), "skipping non-existent log file");
                    continue;
                }
                Ok(metadata) if !metadata.is_file() => {
                    warn!(path = %path.display(), "configured log path is not a file");
                    continue;
                }
                Ok(_) => {}
            }

            if let Err(e) = tailer.tail_file(path, shipper).await {
                error!(path = %path.display(), error = %e, "failed to ingest logs from file");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::shipper::testing::RecordingSink;
    use std::io::Write;
    use std::time::Duration;

    fn config_for(paths: Vec<std::path::PathBuf>) -> IngestConfig {
        IngestConfig {
            enabled: true,
            paths,
            bulk_size: 100,
            poll_interval: Duration::from_secs(30),
            initial_delay: Duration::from_secs(5),
        }
    }

    #[tokio::test]
    async fn disabled_tick_reads_nothing() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "should not be read").unwrap();
        file.flush().unwrap();

        let sink = RecordingSink::default();
        let mut config = config_for(vec![file.path().to_path_buf()]);
        config.enabled = false;

        let mut ingestor = Ingestor::new(config, true, &sink, "application-logs".to_string());
        ingestor.tick().await;
        assert!(sink.bodies.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn backend_disabled_tick_reads_nothing() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "should not be read").unwrap();
        file.flush().unwrap();

        let sink = RecordingSink::default();
        let config = config_for(vec![file.path().to_path_buf()]);

        let mut ingestor = Ingestor::new(config, false, &sink, "application-logs".to_string());
        ingestor.tick().await;
        assert!(sink.bodies.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn bad_paths_do_not_block_good_ones() {
        let directory = tempfile::tempdir().unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "INFO survived").unwrap();
        file.flush().unwrap();

        let sink = RecordingSink::default();
        let config = config_for(vec![
            std::path::PathBuf::from("/nonexistent/missing.log"),
            directory.path().to_path_buf(),
            file.path().to_path_buf(),
        ]);

        let mut ingestor = Ingestor::new(config, true, &sink, "application-logs".to_string());
        ingestor.tick().await;

        let bodies = sink.bodies.lock().unwrap();
        assert_eq!(bodies.len(), 1);
        let text = std::str::from_utf8(&bodies[0]).unwrap();
        assert!(text.contains("survived"));
    }

    #[tokio::test]
    async fn run_exits_promptly_on_cancel() {
        let sink = RecordingSink::default();
        let config = config_for(vec![]);
        let ingestor = Ingestor::new(config, true, &sink, "application-logs".to_string());

        let cancel = CancellationToken::new();
        cancel.cancel();
        // Initial delay is pending when the token fires, so this returns
        // without a tick.
        ingestor.run(cancel).await;
        assert!(sink.bodies.lock().unwrap().is_empty());
    }
}
