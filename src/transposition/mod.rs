//! Transposition module
//!
//! Chromatic tables, chord/key/song transposition and capo solving.

pub mod capo;
pub mod chromatic;
pub mod shapes;
pub mod transpose;

pub use capo::{capo_options, CapoOption};
pub use shapes::{shape_for, ChordShape, Difficulty, OPEN_SHAPES};
pub use transpose::{
    resolve_spelling, transpose, transpose_chord_str, transpose_key, transpose_key_str,
    transpose_song, transpose_token,
};
