// Core data structures for tts-batch

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::md5_hex;

/// Default prefix of the line holding the text to synthesize
pub const DEFAULT_MARKER: &str = "User:";

/// Address of one synthesis server, usually `host:port`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into().trim().trim_end_matches('/').to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build the request URL for `path` on this server
    ///
    /// Bare `host:port` addresses are spoken to over plain HTTP; an address
    /// that already names a scheme is used unchanged.
    pub fn url(&self, path: &str) -> String {
        if self.0.starts_with("http://") || self.0.starts_with("https://") {
            format!("{}{path}", self.0)
        } else {
            format!("http://{}{path}", self.0)
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One unit of input: the raw record text plus what is derived from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    raw_text: String,
    text: String,
    id: String,
}

impl WorkItem {
    /// Build an item from a raw `input` field
    ///
    /// The id hashes the untouched raw text, so changing how the speaker line
    /// is extracted never renames outputs.
    pub fn from_raw(raw_text: impl Into<String>, marker: &str) -> Self {
        let raw_text = raw_text.into();
        let text = extract_query(&raw_text, marker);
        let id = md5_hex(&raw_text);
        Self { raw_text, text, id }
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// Text to synthesize; empty when the record had no speaker line
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Derived id, used as the output file stem
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn has_text(&self) -> bool {
        !self.text.is_empty()
    }
}

/// Remainder of the first line starting with `marker`, trimmed
pub fn extract_query(raw: &str, marker: &str) -> String {
    raw.lines()
        .find_map(|line| line.strip_prefix(marker))
        .map(|rest| rest.trim().to_string())
        .unwrap_or_default()
}

/// Result of one synthesis attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub item_id: String,
    pub server: Address,
    pub success: bool,
    /// Output path on success, failure cause otherwise
    pub detail: String,
}

impl Outcome {
    pub fn success(item: &WorkItem, server: &Address, detail: impl Into<String>) -> Self {
        Self {
            item_id: item.id().to_string(),
            server: server.clone(),
            success: true,
            detail: detail.into(),
        }
    }

    pub fn failure(item: &WorkItem, server: &Address, detail: impl Into<String>) -> Self {
        Self {
            item_id: item.id().to_string(),
            server: server.clone(),
            success: false,
            detail: detail.into(),
        }
    }

    /// `✓` or `✗`
    pub fn marker(&self) -> &'static str {
        if self.success {
            "✓"
        } else {
            "✗"
        }
    }
}

/// A parallel-phase outcome tagged with the position of the item that produced it
#[derive(Debug, Clone)]
pub struct Completion {
    pub index: usize,
    pub outcome: Outcome,
}
