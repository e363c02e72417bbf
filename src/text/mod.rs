//! Text layer
//!
//! Pure text operations with no knowledge of song notation: char-offset
//! conversion, line bounds and string edits used by the command history.

pub mod buffer;
pub mod cursor;

// Re-exports for convenience
pub use buffer::{edit_lines, replace_range, slice, LineEdit};
pub use cursor::{byte_index, line_end, line_start};
