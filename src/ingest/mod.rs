// SPDX-License-Identifier: Apache-2.0

//! Log ingestion pipeline: tails configured files, parses lines into
//! structured documents, and ships them to the search backend in bulk.

pub mod config;
pub mod document;
pub mod error;
pub mod ingestor;
pub mod line_parser;
pub mod shipper;
pub mod tailer;

pub use config::IngestConfig;
pub use document::LogDocument;
pub use error::{Error, Result};
pub use ingestor::Ingestor;
pub use shipper::{BatchShipper, BulkSink};
pub use tailer::FileTailer;
