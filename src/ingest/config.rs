// SPDX-License-Identifier: Apache-2.0

//! Configuration for the log ingestion scheduler.

use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the ingestion scheduler and its tailing passes.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Whether the scheduler looks for new log lines at all.
    pub enabled: bool,
    /// Paths of append-only log files to tail.
    pub paths: Vec<PathBuf>,
    /// Maximum number of log documents sent to the backend in a single bulk
    /// request.
    pub bulk_size: usize,
    /// How frequently the scheduler checks the files for new entries.
    pub poll_interval: Duration,
    /// Delay before the first pass, giving the process time to bootstrap.
    pub initial_delay: Duration,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            paths: vec![PathBuf::from("logs/application.log")],
            bulk_size: 200,
            poll_interval: Duration::from_secs(30),
            initial_delay: Duration::from_secs(5),
        }
    }
}

impl IngestConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.enabled && self.paths.is_empty() {
            return Err("at least one log path must be configured".to_string());
        }
        if self.bulk_size == 0 {
            return Err("bulk size must be greater than zero".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = IngestConfig::default();
        assert!(!config.enabled);
        assert_eq!(config.bulk_size, 200);
        assert_eq!(config.poll_interval, Duration::from_secs(30));
        assert_eq!(config.initial_delay, Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_zero_bulk_size() {
        let config = IngestConfig {
            bulk_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_enabled_without_paths() {
        let config = IngestConfig {
            enabled: true,
            paths: Vec::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
