// In: src/config.rs

//! The single source of truth for table-engine configuration.
//!
//! `EngineConfig` is created once at the host boundary (typically from a JSON
//! document or with `Default`) and passed by reference into the entry points
//! that accept one. Every field has a default, so a partial document is valid,
//! and the plain entry points (`from_columns`, `buffer_view`, `aggregate_count`)
//! behave exactly as `EngineConfig::default()` does.

use serde::{Deserialize, Serialize};

use crate::error::StrataError;

//==================================================================================
// I. Policy Enums
//==================================================================================

/// What a numeric export does when the column is split over several chunks.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExportPolicy {
    /// **Default:** only a single-chunk column can be exported; anything else
    /// fails with `NonContiguous`. Every successful export is zero-copy.
    #[default]
    Strict,

    /// A multi-chunk column is concatenated into an owned buffer that the view
    /// carries itself. `BufferView::is_zero_copy` reports which path was taken.
    CopyFragmented,
}

//==================================================================================
// II. The Unified EngineConfig
//==================================================================================

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct EngineConfig {
    /// When set, columns built by the value bridge are split into chunks of at
    /// most this many rows. `None` (or zero) builds one chunk per column.
    #[serde(default)]
    pub chunk_size_rows: Option<usize>,

    /// Behavior of numeric exports over multi-chunk columns.
    #[serde(default)]
    pub export_policy: ExportPolicy,

    /// Output column name of the count aggregate.
    #[serde(default = "default_count_column_name")]
    pub count_column_name: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            chunk_size_rows: None,
            export_policy: ExportPolicy::default(),
            count_column_name: default_count_column_name(),
        }
    }
}

impl EngineConfig {
    /// Parses a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, StrataError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The effective chunk size, treating zero as "no chunking".
    pub(crate) fn effective_chunk_size(&self) -> Option<usize> {
        self.chunk_size_rows.filter(|&n| n > 0)
    }
}

/// Helper for `serde` to provide a default for `count_column_name`.
fn default_count_column_name() -> String {
    "n".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = EngineConfig::from_json("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.count_column_name, "n");
        assert_eq!(config.export_policy, ExportPolicy::Strict);
    }

    #[test]
    fn test_partial_document() {
        let config =
            EngineConfig::from_json(r#"{"chunk_size_rows": 2, "export_policy": "copy_fragmented"}"#)
                .unwrap();
        assert_eq!(config.effective_chunk_size(), Some(2));
        assert_eq!(config.export_policy, ExportPolicy::CopyFragmented);
    }

    #[test]
    fn test_zero_chunk_size_means_unchunked() {
        let config = EngineConfig {
            chunk_size_rows: Some(0),
            ..Default::default()
        };
        assert_eq!(config.effective_chunk_size(), None);
    }

    #[test]
    fn test_invalid_document() {
        let result = EngineConfig::from_json(r#"{"export_policy": "sometimes"}"#);
        assert!(matches!(result, Err(StrataError::Config(_))));
    }
}
