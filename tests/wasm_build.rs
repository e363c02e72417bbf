//! WASM build test
//!
//! Smoke tests for the JS-facing API, run with `wasm-pack test`.

#![cfg(target_arch = "wasm32")]

use chordsheet_wasm::api::*;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_session_creation() {
    assert!(SongSession::new(JsValue::UNDEFINED).is_ok());
}

#[wasm_bindgen_test]
fn test_session_format() {
    let mut session = SongSession::new(JsValue::UNDEFINED).unwrap();
    let out = session
        .format("{title: T}\n[G]la", "text", JsValue::UNDEFINED)
        .unwrap();
    assert!(out.starts_with("T\n"));
    assert!(session.format("x", "pdf", JsValue::UNDEFINED).is_err());
}

#[wasm_bindgen_test]
fn test_free_functions() {
    assert_eq!(transpose_chord("G", 2, false), "A");
    assert_eq!(transpose_key("C", 3), "Eb");
    assert!(parse_song("[G]la").is_ok());
    assert!(detect_autocomplete("{tit", -1).is_err());
    assert!(detect_autocomplete("{tit", 4).unwrap().is_object());
}
