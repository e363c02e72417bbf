//! Models module for the song sheet engine
//!
//! Data types shared by the parser, transposer, renderers and editing layers.

pub mod chord;
pub mod editor_state;
pub mod section;
pub mod song;

// Re-export commonly used types
pub use chord::{ChordSymbol, ChordToken, Key, PitchClass, Spelling};
pub use editor_state::{EditorContext, TextSelection};
pub use section::{Section, SectionKind};
pub use song::{ChordLyricPair, Directive, LineContent, NotationLine, SongModel};
