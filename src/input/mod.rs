//! Input record loading
//!
//! The input file is a JSON array of objects. Only the `input` string of each
//! object matters; any other fields are ignored.

use serde::Deserialize;
use std::path::Path;

use crate::error::{Error, Result};
use crate::models::WorkItem;

/// One record of the input file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputRecord {
    #[serde(default)]
    pub input: String,
}

/// Parse a JSON record array into work items, preserving order
pub fn parse_items(json: &str, marker: &str) -> serde_json::Result<Vec<WorkItem>> {
    let records: Vec<InputRecord> = serde_json::from_str(json)?;
    Ok(records
        .into_iter()
        .map(|record| WorkItem::from_raw(record.input, marker))
        .collect())
}

/// Load work items from a JSON file
pub async fn load_items(path: &Path, marker: &str) -> Result<Vec<WorkItem>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::input(path, format!("failed to read: {e}")))?;

    let items = parse_items(&content, marker).map_err(|e| Error::input(path, e.to_string()))?;

    tracing::debug!(path = %path.display(), count = items.len(), "Loaded input records");
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_MARKER;

    #[test]
    fn test_parse_items_keeps_order_and_ignores_extra_fields() {
        let json = r#"[
            {"input": "User: one", "output": "ignored"},
            {"input": "User: two"},
            {"other": 1}
        ]"#;

        let items = parse_items(json, DEFAULT_MARKER).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].text(), "one");
        assert_eq!(items[1].text(), "two");
        assert!(!items[2].has_text());
        assert_eq!(items[2].raw_text(), "");
    }

    #[test]
    fn test_parse_items_rejects_non_array() {
        assert!(parse_items(r#"{"input": "User: hi"}"#, DEFAULT_MARKER).is_err());
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let err = load_items(Path::new("/definitely/not/here.json"), DEFAULT_MARKER)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Input { .. }));
    }
}
