// Autocomplete detection and the session-level suggestion list

use chordsheet_wasm::autocomplete::{detect, AutocompleteState};
use chordsheet_wasm::error::EngineError;
use chordsheet_wasm::parse::parse;

#[test]
fn test_detect_open_directive() {
    let ctx = detect("{tit", 4).unwrap().unwrap();
    assert_eq!(ctx.trigger_char, '{');
    assert_eq!(ctx.filter_text, "tit");
    assert!(ctx.is_visible);
}

#[test]
fn test_detect_after_closed_directive() {
    assert_eq!(detect("{title}", 7).unwrap(), None);
}

#[test]
fn test_detect_rejects_out_of_range_cursor() {
    assert!(matches!(
        detect("{tit", 9),
        Err(EngineError::InvalidOffset { offset: 9, len: 4 })
    ));
}

#[test]
fn test_detect_does_not_cross_lines() {
    assert_eq!(detect("{title\nAm", 9).unwrap(), None);
}

#[test]
fn test_chord_suggestions_prefer_song_chords() {
    let model = parse("{key: F}\n[Bb]la [Gm7]la");
    let mut state = AutocompleteState::default();
    let text = "[Bb]la [Gm7]la\n[G";
    let cursor = text.chars().count();

    let view = state.update(text, cursor, Some(&model)).unwrap().unwrap();
    let labels: Vec<&str> = view.suggestions.iter().map(|s| s.label.as_str()).collect();
    assert!(labels.contains(&"Gm7"));
    assert!(labels.iter().all(|l| l.to_lowercase().contains('g')));
}

#[test]
fn test_escape_keeps_list_closed_until_token_changes() {
    let mut state = AutocompleteState::default();
    state.update("{ti", 3, None).unwrap();
    assert!(state.is_visible());

    state.dismiss();
    state.update("{tit", 4, None).unwrap();
    assert!(!state.is_visible());
    assert_eq!(state.accept(), None);

    // A new token reopens the list
    state.update("{tit}\n{ar", 9, None).unwrap();
    assert!(state.is_visible());
}

#[test]
fn test_accept_replaces_filter_text() {
    let mut state = AutocompleteState::default();
    state.update("x {soc", 6, None).unwrap();
    let completion = state.accept().unwrap();
    assert_eq!(completion.replace_start, 3);
    assert_eq!(completion.replace_end, 6);
    assert_eq!(completion.insert_text, "start_of_chorus}");
    assert_eq!(completion.cursor, 19);
    assert!(!state.is_visible());
}
