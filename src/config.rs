//! Engine configuration
//!
//! Every field has a default so callers only send what they override. The
//! wasm session takes a JS object; native callers can use `from_json`.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Undo/redo history tuning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HistoryConfig {
    /// Maximum entries kept on each stack; oldest are dropped first
    pub max_depth: usize,
    /// Minimum time between two snapshots of keystroke-level edits
    pub debounce_ms: u64,
    /// Change in buffer length a keystroke-level edit must exceed to be snapshotted
    pub min_char_delta: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_depth: 100,
            debounce_ms: 500,
            min_char_delta: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AutocompleteConfig {
    pub max_suggestions: usize,
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        Self { max_suggestions: 12 }
    }
}

/// Per-session engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    pub history: HistoryConfig,
    pub autocomplete: AutocompleteConfig,
    /// Formatter cache capacity (entries)
    pub cache_capacity: usize,
    /// Text inserted by indent and removed by outdent
    pub indent_unit: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history: HistoryConfig::default(),
            autocomplete: AutocompleteConfig::default(),
            cache_capacity: 10,
            indent_unit: "  ".to_string(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON configuration object
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EngineConfig =
            serde_json::from_str(json).map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.history.max_depth == 0 {
            return Err(EngineError::InvalidConfig(
                "history.maxDepth must be at least 1".to_string(),
            ));
        }
        if self.cache_capacity == 0 {
            return Err(EngineError::InvalidConfig(
                "cacheCapacity must be at least 1".to_string(),
            ));
        }
        if self.indent_unit.is_empty() || self.indent_unit.contains('\n') {
            return Err(EngineError::InvalidConfig(
                "indentUnit must be non-empty and single-line".to_string(),
            ));
        }
        Ok(())
    }
}
