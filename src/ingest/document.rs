// SPDX-License-Identifier: Apache-2.0

use serde::Serialize;

/// A structured log document produced by the line parser and indexed by the
/// search backend. Value type, no identity beyond content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogDocument {
    /// Event time, RFC 3339 UTC.
    pub timestamp: String,
    /// Uppercased severity, when one could be extracted from the line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Line text with any timestamp and level prefixes removed.
    pub message: String,
    /// The original line, untouched.
    pub raw: String,
    /// Path of the file the line was read from.
    pub source: String,
}
