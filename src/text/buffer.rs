//! Pure string edits addressed by char offsets
//!
//! Every function takes the current text and returns new text; nothing here
//! keeps state between calls.

use super::cursor::{byte_index, line_end, line_start};
use crate::error::{EngineError, Result};
use crate::models::TextSelection;

/// Result of a line-block edit: new text plus the adjusted selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineEdit {
    pub text: String,
    pub selection: TextSelection,
}

/// Replace chars `[start, end)` with `insert`
pub fn replace_range(text: &str, start: usize, end: usize, insert: &str) -> Result<String> {
    if start > end {
        return Err(EngineError::InvalidSelection {
            start,
            end,
            len: text.chars().count(),
        });
    }
    let start_byte = byte_index(text, start)?;
    let end_byte = byte_index(text, end)?;

    let mut out = String::with_capacity(text.len() + insert.len());
    out.push_str(&text[..start_byte]);
    out.push_str(insert);
    out.push_str(&text[end_byte..]);
    Ok(out)
}

/// Chars `[start, end)` as a string
pub fn slice(text: &str, start: usize, end: usize) -> Result<&str> {
    let start_byte = byte_index(text, start)?;
    let end_byte = byte_index(text, end)?;
    Ok(&text[start_byte..end_byte.max(start_byte)])
}

/// Rewrite every line touched by `selection`
///
/// `f` receives the touched lines and must return the same number of lines.
/// A non-empty selection ending right after a newline does not touch the
/// following line. The selection start moves with the first line's change,
/// the end with the whole block's change, neither moving before the block.
pub fn edit_lines<F>(text: &str, selection: TextSelection, f: F) -> Result<LineEdit>
where
    F: FnOnce(&[&str]) -> Vec<String>,
{
    let chars: Vec<char> = text.chars().collect();
    if selection.start > selection.end || selection.end > chars.len() {
        return Err(EngineError::InvalidSelection {
            start: selection.start,
            end: selection.end,
            len: chars.len(),
        });
    }

    let mut last = selection.end;
    if selection.end > selection.start && chars[selection.end - 1] == '\n' {
        last = selection.end - 1;
    }
    let block_start = line_start(&chars, selection.start);
    let block_end = line_end(&chars, last);

    let block: String = chars[block_start..block_end].iter().collect();
    let lines: Vec<&str> = block.split('\n').collect();
    let new_lines = f(&lines);

    let first_delta = count(&new_lines[0]) as isize - count(lines[0]) as isize;
    let new_block = new_lines.join("\n");
    let total_delta = count(&new_block) as isize - count(&block) as isize;

    let mut out = String::with_capacity(text.len() + 16);
    out.extend(&chars[..block_start]);
    out.push_str(&new_block);
    out.extend(&chars[block_end..]);

    let shift =
        |pos: usize, delta: isize| (pos as isize + delta).max(block_start as isize) as usize;
    let start = shift(selection.start, first_delta);
    let end = if selection.is_collapsed() {
        start
    } else {
        shift(selection.end, total_delta).max(start)
    };

    Ok(LineEdit {
        text: out,
        selection: TextSelection::new(start, end),
    })
}

fn count(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_range() {
        assert_eq!(replace_range("hello", 1, 3, "EY").unwrap(), "hEYlo");
        assert_eq!(replace_range("héllo", 5, 5, "!").unwrap(), "héllo!");
        assert!(replace_range("abc", 2, 1, "").is_err());
        assert!(replace_range("abc", 0, 9, "").is_err());
    }

    #[test]
    fn test_edit_lines_prefixes_block() {
        let edit = edit_lines("one\ntwo\nthree", TextSelection::new(1, 5), |lines| {
            lines.iter().map(|l| format!("> {}", l)).collect()
        })
        .unwrap();
        assert_eq!(edit.text, "> one\n> two\nthree");
        assert_eq!(edit.selection, TextSelection::new(3, 9));
    }

    #[test]
    fn test_edit_lines_selection_ending_at_line_start() {
        let edit = edit_lines("one\ntwo", TextSelection::new(0, 4), |lines| {
            assert_eq!(lines.len(), 1);
            lines.iter().map(|l| l.to_uppercase()).collect()
        })
        .unwrap();
        assert_eq!(edit.text, "ONE\ntwo");
    }

    #[test]
    fn test_edit_lines_caret() {
        let edit = edit_lines("ab\ncd", TextSelection::caret(4), |lines| {
            lines.iter().map(|l| format!("  {}", l)).collect()
        })
        .unwrap();
        assert_eq!(edit.text, "ab\n  cd");
        assert_eq!(edit.selection, TextSelection::caret(6));
    }
}
