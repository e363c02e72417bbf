//! Editing context passed in by the caller
//!
//! The editing surface owns the authoritative buffer. It hands the engine a
//! fresh `EditorContext` on every call and receives an updated one back; the
//! engine never holds on to buffer text between calls except as history
//! snapshots.
//!
//! All offsets count Unicode scalar values (chars), not bytes.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Half-open selection range `[start, end)`; collapsed when `start == end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextSelection {
    pub start: usize,
    pub end: usize,
}

impl TextSelection {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Collapsed selection (caret only)
    pub fn caret(pos: usize) -> Self {
        Self { start: pos, end: pos }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Buffer text plus cursor and selection
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EditorContext {
    pub text: String,
    pub cursor: usize,
    pub selection: TextSelection,
}

impl EditorContext {
    pub fn new(text: impl Into<String>, selection: TextSelection) -> Self {
        Self {
            text: text.into(),
            cursor: selection.end,
            selection,
        }
    }

    /// Context with a collapsed selection at `cursor`
    pub fn with_cursor(text: impl Into<String>, cursor: usize) -> Self {
        Self::new(text, TextSelection::caret(cursor))
    }

    /// Length of the buffer in chars
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Reject cursors and selections that do not fit the buffer
    pub fn validate(&self) -> Result<()> {
        let len = self.char_len();
        if self.cursor > len {
            log::warn!("cursor {} beyond buffer length {}", self.cursor, len);
            return Err(EngineError::InvalidOffset {
                offset: self.cursor as i64,
                len,
            });
        }
        if self.selection.start > self.selection.end || self.selection.end > len {
            log::warn!(
                "selection {}..{} invalid for buffer length {}",
                self.selection.start,
                self.selection.end,
                len
            );
            return Err(EngineError::InvalidSelection {
                start: self.selection.start,
                end: self.selection.end,
                len,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_end_of_buffer() {
        let ctx = EditorContext::with_cursor("héllo", 5);
        assert!(ctx.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_cursor_past_end() {
        let ctx = EditorContext::with_cursor("abc", 4);
        assert_eq!(
            ctx.validate(),
            Err(EngineError::InvalidOffset { offset: 4, len: 3 })
        );
    }

    #[test]
    fn test_validate_rejects_reversed_selection() {
        let ctx = EditorContext::new("abcdef", TextSelection::new(4, 2));
        assert!(matches!(
            ctx.validate(),
            Err(EngineError::InvalidSelection { start: 4, end: 2, .. })
        ));
    }
}
