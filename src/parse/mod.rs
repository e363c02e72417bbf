//! Parsing module for the song sheet engine
//!
//! Turns raw ChordPro-style text into a `SongModel` and derives sections.

pub mod chord;
pub mod directives;
pub mod grammar;
pub mod sections;

// Re-export commonly used functions
pub use chord::{is_chord, parse_chord, parse_key};
pub use directives::{DirectiveCategory, DirectiveSpec, DIRECTIVES};
pub use grammar::{parse, parse_line};
pub use sections::{sections_to_text, segment};
