//! Char-offset positions in a text buffer
//!
//! Callers address the buffer by char offsets; Rust strings are indexed by
//! bytes. These helpers convert between the two and find line bounds.

use crate::error::{EngineError, Result};

/// Byte index of a char offset; the offset may equal the char length
pub fn byte_index(text: &str, offset: usize) -> Result<usize> {
    if offset == 0 {
        return Ok(0);
    }
    match text.char_indices().nth(offset) {
        Some((byte, _)) => Ok(byte),
        None => {
            let len = text.chars().count();
            if offset == len {
                Ok(text.len())
            } else {
                Err(EngineError::InvalidOffset {
                    offset: offset as i64,
                    len,
                })
            }
        }
    }
}

/// Char offset where the line containing `offset` starts
pub fn line_start(chars: &[char], offset: usize) -> usize {
    let mut i = offset.min(chars.len());
    while i > 0 && chars[i - 1] != '\n' {
        i -= 1;
    }
    i
}

/// Char offset of the `\n` ending the line containing `offset` (or the end)
pub fn line_end(chars: &[char], offset: usize) -> usize {
    let mut i = offset.min(chars.len());
    while i < chars.len() && chars[i] != '\n' {
        i += 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_index_multibyte() {
        let text = "é[G]";
        assert_eq!(byte_index(text, 0).unwrap(), 0);
        assert_eq!(byte_index(text, 1).unwrap(), 2);
        assert_eq!(byte_index(text, 4).unwrap(), 5);
        assert!(byte_index(text, 5).is_err());
    }

    #[test]
    fn test_line_bounds() {
        let chars: Vec<char> = "ab\ncd\nef".chars().collect();
        assert_eq!(line_start(&chars, 4), 3);
        assert_eq!(line_end(&chars, 4), 5);
        assert_eq!(line_start(&chars, 3), 3);
        assert_eq!(line_end(&chars, 8), 8);
    }
}
