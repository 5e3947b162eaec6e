// SPDX-License-Identifier: Apache-2.0

//! Byte-offset file tailing.
//!
//! The tailer owns one byte offset per configured path and reads only the
//! bytes appended since the previous pass. A file that shrinks below its
//! stored offset is treated as rotated and re-read from the start. Offsets
//! live for the process lifetime only; a restart re-ingests or skips
//! depending on how the files changed in the meantime.

use chrono::Utc;
use std::collections::HashMap;
use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncSeekExt, BufReader};
use tracing::debug;

use crate::ingest::line_parser;
use crate::ingest::shipper::{BatchShipper, BulkSink};
use crate::ingest::Result;

/// Per-path tailing state. Explicitly owned by the ingestion loop rather
/// than living in process-global state, so passes are independently
/// testable.
#[derive(Default)]
pub struct FileTailer {
    offsets: HashMap<PathBuf, u64>,
}

impl FileTailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored offset for a path, 0 when the path has never been read.
    pub fn offset(&self, path: &Path) -> u64 {
        self.offsets.get(path).copied().unwrap_or(0)
    }

    /// Run one pass over a single file, feeding parsed documents to the
    /// shipper and flushing the remainder at end of file. The stored offset
    /// advances only after the pass completes without an IO error.
    pub async fn tail_file<S: BulkSink>(
        &mut self,
        path: &Path,
        shipper: &mut BatchShipper<S>,
    ) -> Result<()> {
        let stored = self.offset(path);
        let new_offset = read_new_lines(path, stored, shipper).await?;
        self.offsets.insert(path.to_path_buf(), new_offset);
        Ok(())
    }
}

async fn read_new_lines<S: BulkSink>(
    path: &Path,
    stored: u64,
    shipper: &mut BatchShipper<S>,
) -> Result<u64> {
    let file = File::open(path).await?;
    let length = file.metadata().await?.len();

    let mut offset = stored;
    if length < stored {
        debug!(
            path = %path.display(),
            stored,
            length,
            "file shrank below stored offset, assuming rotation"
        );
        offset = 0;
    }

    let mut reader = BufReader::new(file);
    reader.seek(SeekFrom::Start(offset)).await?;

    let mut buf = Vec::new();
    loop {
        buf.clear();
        let read = reader.read_until(b'\n', &mut buf).await?;
        if read == 0 {
            break;
        }
        offset += read as u64;

        let line = decode_line(&buf);
        if let Some(document) = line_parser::parse_line(&line, path, Utc::now()) {
            shipper.offer(document).await;
        }
    }

    shipper.flush().await;
    Ok(offset)
}

/// Strip the line terminator and decode the raw bytes as UTF-8, replacing
/// invalid sequences rather than dropping the line.
fn decode_line(buf: &[u8]) -> String {
    let mut bytes = buf;
    if let [rest @ .., b'\n'] = bytes {
        bytes = rest;
    }
    if let [rest @ .., b'\r'] = bytes {
        bytes = rest;
    }
    String::from_utf8_lossy(bytes).into_owned()
}
