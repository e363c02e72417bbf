//! Song sheet engine WASM API
//!
//! The JavaScript-facing surface of the engine.
//!
//! # Module Structure
//!
//! - `helpers`: serialization, error mapping and offset checks
//! - `song`: stateless functions (parse, segment, transpose, capo, validate, format)
//! - `session`: `SongSession`, the per-document stateful API (history, cache, autocomplete)

pub mod helpers;
pub mod session;
pub mod song;

pub use session::SongSession;
pub use song::{
    capo_options_js, detect_autocomplete, format_song, parse_song, sections_to_text_js,
    segment_song, transpose_chord, transpose_key, validate_song,
};
