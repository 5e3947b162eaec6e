// SPDX-License-Identifier: Apache-2.0

//! Buffers parsed documents and flushes them as bulk index requests.
//!
//! Delivery is at most once: a failed flush is logged and its batch dropped,
//! and the tailer's offset still advances past the lines that produced it.
//! Ingestion keeps making progress even when the backend is unavailable.

use bytes::Bytes;
use std::future::Future;
use tower::BoxError;
use tracing::error;

use crate::ingest::document::LogDocument;

/// Sink for assembled bulk payloads. Implemented by the backend client and
/// by in-test fakes.
pub trait BulkSink {
    fn send_bulk(&self, body: Bytes) -> impl Future<Output = Result<(), BoxError>> + Send;
}

impl<S: BulkSink + Sync> BulkSink for &S {
    fn send_bulk(&self, body: Bytes) -> impl Future<Output = Result<(), BoxError>> + Send {
        (*self).send_bulk(body)
    }
}

/// Accumulates documents and sends them in bulk once the configured size is
/// reached; any remainder is sent when the caller flushes at end of input.
pub struct BatchShipper<S> {
    sink: S,
    index: String,
    bulk_size: usize,
    buffer: Vec<LogDocument>,
}

impl<S: BulkSink> BatchShipper<S> {
    pub fn new(sink: S, index: impl Into<String>, bulk_size: usize) -> Self {
        let bulk_size = bulk_size.max(1);
        Self {
            sink,
            index: index.into(),
            bulk_size,
            buffer: Vec::with_capacity(bulk_size),
        }
    }

    /// Number of documents currently buffered.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Add a document, flushing immediately when the buffer fills.
    pub async fn offer(&mut self, document: LogDocument) {
        self.buffer.push(document);
        if self.buffer.len() >= self.bulk_size {
            self.flush().await;
        }
    }

    /// Send everything buffered as one bulk request. Empty buffers are a
    /// no-op; sink failures are logged and the batch is dropped.
    pub async fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let documents = std::mem::take(&mut self.buffer);

        let body = match encode_bulk(&self.index, &documents) {
            Ok(body) => body,
            Err(e) => {
                error!(error = %e, "failed to encode bulk payload");
                return;
            }
        };

        if let Err(e) = self.sink.send_bulk(body).await {
            error!(error = %e, count = documents.len(), "failed to ship log batch");
        }
    }
}

/// Serialize documents into the bulk NDJSON body: an index-action line
/// naming the target index, then the document line, repeated.
fn encode_bulk(index: &str, documents: &[LogDocument]) -> crate::ingest::Result<Bytes> {
    let mut payload = Vec::new();
    for document in documents {
        let action = serde_json::json!({ "index": { "_index": index } });
        serde_json::to_writer(&mut payload, &action)?;
        payload.push(b'\n');
        serde_json::to_writer(&mut payload, document)?;
        payload.push(b'\n');
    }
    Ok(Bytes::from(payload))
}
