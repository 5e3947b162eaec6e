// SPDX-License-Identifier: Apache-2.0

//! Heuristic decoder turning one raw log line into a structured document.
//!
//! Extraction order: an optional leading timestamp (possibly bracketed),
//! then an optional level (bracketed span or an all-letters first token),
//! then whatever remains is the message. Lines the heuristics cannot split
//! still produce a document; only blank lines are dropped.

use chrono::{DateTime, Utc};
use std::path::Path;

use crate::ingest::document::LogDocument;
use crate::query::timestamp;

/// Parse one raw line into a document. `now` is the fallback timestamp when
/// no leading timestamp can be extracted; it is injected so tests control it.
pub fn parse_line(line: &str, source: &Path, now: DateTime<Utc>) -> Option<LogDocument> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut parsed_timestamp = None;
    let mut rest = trimmed;

    if let Some(first_space) = trimmed.find(' ') {
        if first_space > 0 {
            // Brackets around the timestamp are tolerated: `[...]` becomes
            // whitespace before the parse attempt.
            let candidate: String = trimmed[..first_space]
                .chars()
                .map(|c| if c == '[' || c == ']' { ' ' } else { c })
                .collect();
            if let Some(ts) = timestamp::parse_timestamp(candidate.trim()) {
                parsed_timestamp = Some(ts);
                rest = trimmed[first_space + 1..].trim();
            }
        }
    }

    let mut level = None;
    let mut message = rest;

    if rest.starts_with('[') {
        if let Some(closing) = rest.find(']') {
            if closing > 0 {
                level = Some(rest[1..closing].trim().to_string());
                message = rest[closing + 1..].trim();
            }
        }
    } else if let Some(space) = rest.find(' ') {
        if space > 0 {
            let candidate = &rest[..space];
            if candidate.chars().all(|c| c.is_alphabetic()) {
                level = Some(candidate.to_string());
                message = rest[space + 1..].trim();
            }
        }
    }

    let event_time = parsed_timestamp.unwrap_or(now);
    Some(LogDocument {
        timestamp: timestamp::format_instant(&event_time),
        level: level.map(|l| l.to_uppercase()),
        message: message.to_string(),
        raw: line.to_string(),
        source: source.display().to_string(),
    })
}
