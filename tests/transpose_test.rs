// Transposition laws over generated chords

use chordsheet_wasm::models::{ChordSymbol, PitchClass, Spelling};
use chordsheet_wasm::parse::parse_chord;
use chordsheet_wasm::transposition::{transpose, transpose_chord_str, transpose_key_str};
use proptest::prelude::*;

const SUFFIXES: &[&str] = &[
    "", "m", "7", "maj7", "m7", "sus4", "dim", "aug", "add9", "m7b5", "6", "9",
];

fn chord_strategy() -> impl Strategy<Value = ChordSymbol> {
    (
        0i32..12,
        prop::sample::select(SUFFIXES),
        prop::option::of(0i32..12),
    )
        .prop_map(|(root, suffix, bass)| {
            ChordSymbol::new(PitchClass::new(root), suffix, bass.map(PitchClass::new))
        })
}

proptest! {
    #[test]
    fn transpose_composes(chord in chord_strategy(), a in -24i32..24, b in -24i32..24) {
        prop_assert_eq!(transpose(&transpose(&chord, a), b), transpose(&chord, a + b));
    }

    #[test]
    fn transpose_by_octave_is_identity(chord in chord_strategy(), octaves in -3i32..3) {
        prop_assert_eq!(transpose(&chord, 12 * octaves), chord.clone());
        prop_assert_eq!(transpose(&chord, 0), chord);
    }

    #[test]
    fn spelled_chord_reparses(chord in chord_strategy(), n in -11i32..12) {
        let moved = transpose(&chord, n);
        let text = moved.to_string_with(Spelling::Flats);
        prop_assert_eq!(parse_chord(&text), Some(moved));
    }
}

#[test]
fn test_chord_strings() {
    assert_eq!(transpose_chord_str("G", 2, Spelling::Sharps), "A");
    assert_eq!(transpose_chord_str("D/F#", 2, Spelling::Sharps), "E/G#");
    assert_eq!(transpose_chord_str("Am7", 1, Spelling::Flats), "Bbm7");
    assert_eq!(transpose_chord_str("C", -1, Spelling::Sharps), "B");
    // Not a chord: passed through
    assert_eq!(transpose_chord_str("N.C.", 5, Spelling::Sharps), "N.C.");
    assert_eq!(transpose_chord_str("Hmm", 5, Spelling::Sharps), "Hmm");
}

#[test]
fn test_key_strings_follow_destination_convention() {
    assert_eq!(transpose_key_str("G", 2), "A");
    assert_eq!(transpose_key_str("C", 5), "F");
    assert_eq!(transpose_key_str("C", 3), "Eb");
    assert_eq!(transpose_key_str("Am", 2), "Bm");
    assert_eq!(transpose_key_str("unknown", 2), "unknown");
}
