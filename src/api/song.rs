//! Stateless API functions
//!
//! Pure operations that need no session: parsing, segmentation, transposition,
//! capo suggestions, validation and one-off rendering.

use wasm_bindgen::prelude::*;

use super::helpers::{checked_offset, deserialize, deserialize_or_default, engine_error, serialize};
use crate::models::{Section, Spelling};
use crate::parse::{parse, parse_key, sections_to_text, segment};
use crate::renderers::{self, FormatOptions, OutputKind};
use crate::transposition::{capo_options, transpose_chord_str, transpose_key_str};

#[wasm_bindgen(js_name = parseSong)]
pub fn parse_song(text: &str) -> Result<JsValue, JsValue> {
    serialize(&parse(text), "parseSong")
}

#[wasm_bindgen(js_name = segmentSong)]
pub fn segment_song(text: &str) -> Result<JsValue, JsValue> {
    serialize(&segment(&parse(text)), "segmentSong")
}

/// Join sections back into notation text
#[wasm_bindgen(js_name = sectionsToText)]
pub fn sections_to_text_js(sections: JsValue) -> Result<String, JsValue> {
    let sections: Vec<Section> = deserialize(sections, "sectionsToText")?;
    Ok(sections_to_text(&sections))
}

/// Transpose one chord; text that is not a chord is returned unchanged
#[wasm_bindgen(js_name = transposeChord)]
pub fn transpose_chord(chord: &str, semitones: i32, use_flats: bool) -> String {
    let spelling = if use_flats { Spelling::Flats } else { Spelling::Sharps };
    transpose_chord_str(chord, semitones, spelling)
}

/// Transpose a key name, spelled by the destination key's convention
#[wasm_bindgen(js_name = transposeKey)]
pub fn transpose_key(key: &str, semitones: i32) -> String {
    transpose_key_str(key, semitones)
}

/// Capo positions and shapes that sound in `key`; empty for unknown keys
#[wasm_bindgen(js_name = capoOptions)]
pub fn capo_options_js(key: &str) -> Result<JsValue, JsValue> {
    let options = parse_key(key).map(capo_options).unwrap_or_default();
    serialize(&options, "capoOptions")
}

#[wasm_bindgen(js_name = validateSong)]
pub fn validate_song(text: &str) -> Result<JsValue, JsValue> {
    serialize(&crate::diagnostics::validate(text), "validateSong")
}

/// Autocomplete context at the cursor, or null
#[wasm_bindgen(js_name = detectAutocomplete)]
pub fn detect_autocomplete(text: &str, cursor: i32) -> Result<JsValue, JsValue> {
    let cursor = checked_offset(cursor, text)?;
    match crate::autocomplete::detect(text, cursor).map_err(engine_error)? {
        Some(ctx) => serialize(&ctx, "detectAutocomplete"),
        None => Ok(JsValue::NULL),
    }
}

/// One-off render without a session cache
#[wasm_bindgen(js_name = formatSong)]
pub fn format_song(text: &str, kind: &str, options: JsValue) -> Result<String, JsValue> {
    let kind: OutputKind = kind.parse().map_err(engine_error)?;
    let options: FormatOptions = deserialize_or_default(options, "formatSong options")?;
    renderers::format(&parse(text), kind, &options).map_err(engine_error)
}
