//! Chord, key and song transposition
//!
//! Transposition is a rotation on the 12-step chromatic ring. Any integer
//! offset is accepted and reduced modulo 12. Chord suffixes pass through
//! unchanged; root and slash bass rotate independently. Text that does not
//! follow the chord grammar is returned as-is.

use crate::models::{ChordSymbol, ChordToken, Key, LineContent, SongModel, Spelling};
use crate::parse::{parse_chord, parse_key};

/// Rotate a chord by `semitones`
pub fn transpose(chord: &ChordSymbol, semitones: i32) -> ChordSymbol {
    ChordSymbol {
        root: chord.root.rotate(semitones),
        suffix: chord.suffix.clone(),
        bass: chord.bass.map(|b| b.rotate(semitones)),
    }
}

/// Rotate a key by `semitones`, keeping its minor tag
pub fn transpose_key(key: Key, semitones: i32) -> Key {
    Key {
        tonic: key.tonic.rotate(semitones),
        minor: key.minor,
    }
}

/// Transpose chord text, returning it unchanged when it is not a chord
pub fn transpose_chord_str(text: &str, semitones: i32, spelling: Spelling) -> String {
    match parse_chord(text) {
        Some(chord) => transpose(&chord, semitones).to_string_with(spelling),
        None => text.to_string(),
    }
}

/// Transpose key text ("G", "Bbm"), spelled the way the new key is written
pub fn transpose_key_str(text: &str, semitones: i32) -> String {
    match parse_key(text) {
        Some(key) => transpose_key(key, semitones).to_string(),
        None => text.to_string(),
    }
}

/// Transpose key text in a fixed spelling, so the key matches the chords
/// rendered next to it
fn transpose_key_spelled(text: &str, semitones: i32, spelling: Spelling) -> String {
    parse_key(text)
        .map(|key| transpose_key(key, semitones).to_string_with(spelling))
        .unwrap_or_else(|| text.to_string())
}

/// Pick the spelling for a render: forced flats, else the convention of the
/// destination key, else sharps
pub fn resolve_spelling(key: Option<Key>, semitones: i32, force_flats: bool) -> Spelling {
    if force_flats {
        return Spelling::Flats;
    }
    key.map(|k| transpose_key(k, semitones).spelling())
        .unwrap_or(Spelling::Sharps)
}

/// Transposed copy of a chord token; unrecognized tokens are cloned
pub fn transpose_token(token: &ChordToken, semitones: i32, spelling: Spelling) -> ChordToken {
    match &token.parsed {
        Some(chord) => {
            let moved = transpose(chord, semitones);
            ChordToken {
                raw: moved.to_string_with(spelling),
                parsed: Some(moved),
            }
        }
        None => token.clone(),
    }
}

/// Transposed copy of a whole song, key metadata included
///
/// Lines whose content changes get their `raw` text regenerated, so the
/// result segments and round-trips like a freshly parsed buffer.
pub fn transpose_song(model: &SongModel, semitones: i32, spelling: Spelling) -> SongModel {
    let mut song = model.clone();

    if let Some(key) = song.metadata.get_mut("key") {
        *key = transpose_key_spelled(key, semitones, spelling);
    }

    for line in &mut song.lines {
        let changed = match &mut line.content {
            LineContent::Lyrics { pairs } => {
                let mut changed = false;
                for pair in pairs.iter_mut() {
                    if let Some(token) = pair.chord.as_mut() {
                        if token.is_recognized() {
                            *token = transpose_token(token, semitones, spelling);
                            changed = true;
                        }
                    }
                }
                changed
            }
            LineContent::Directive(directive) if directive.canonical == "key" => {
                if let Some(value) = directive.value.as_mut() {
                    *value = transpose_key_spelled(value, semitones, spelling);
                }
                true
            }
            _ => false,
        };
        if changed {
            line.raw = line.content.to_source();
        }
    }

    log::debug!("transposed song by {} semitones ({:?})", semitones, spelling);
    song
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PitchClass;
    use crate::parse::parse;

    #[test]
    fn test_transpose_chord_text() {
        assert_eq!(transpose_chord_str("G", 2, Spelling::Sharps), "A");
        assert_eq!(transpose_chord_str("D", 2, Spelling::Sharps), "E");
        assert_eq!(transpose_chord_str("Am7", 1, Spelling::Flats), "Bbm7");
        assert_eq!(transpose_chord_str("Am7", 1, Spelling::Sharps), "A#m7");
        assert_eq!(transpose_chord_str("G/B", -2, Spelling::Sharps), "F/A");
        assert_eq!(transpose_chord_str("C", -1, Spelling::Sharps), "B");
    }

    #[test]
    fn test_malformed_chord_passes_through() {
        assert_eq!(transpose_chord_str("N.C.", 5, Spelling::Sharps), "N.C.");
        assert_eq!(transpose_chord_str("", 5, Spelling::Sharps), "");
    }

    #[test]
    fn test_transpose_key_keeps_minor() {
        let am = Key::minor(PitchClass::new(9));
        assert_eq!(transpose_key(am, 3), Key::minor(PitchClass::C));
        assert_eq!(transpose_key_str("Am", 5), "Dm");
        assert_eq!(transpose_key_str("G", 3), "Bb");
        assert_eq!(transpose_key_str("what", 3), "what");
    }

    #[test]
    fn test_resolve_spelling() {
        let g = Some(Key::major(PitchClass::new(7)));
        assert_eq!(resolve_spelling(g, 3, false), Spelling::Flats); // Bb
        assert_eq!(resolve_spelling(g, 2, false), Spelling::Sharps); // A
        assert_eq!(resolve_spelling(None, 3, false), Spelling::Sharps);
        assert_eq!(resolve_spelling(None, 0, true), Spelling::Flats);
    }

    #[test]
    fn test_transpose_song() {
        let song = parse("{key: G}\n[G]Amazing [D/F#]grace [N.C.]");
        let moved = transpose_song(&song, 3, Spelling::Flats);
        assert_eq!(moved.meta("key"), Some("Bb"));
        assert_eq!(moved.lines[0].raw, "{key: Bb}");
        assert_eq!(moved.lines[1].raw, "[Bb]Amazing [F/A]grace [N.C.]");
        // the source model is untouched
        assert_eq!(song.lines[1].raw, "[G]Amazing [D/F#]grace [N.C.]");
    }

    #[test]
    fn test_song_key_follows_render_spelling() {
        let song = parse("{key: E}\n[E]la [B]lo");
        let moved = transpose_song(&song, 2, Spelling::Flats);
        assert_eq!(moved.meta("key"), Some("Gb"));
        assert_eq!(moved.lines[0].raw, "{key: Gb}");
        assert_eq!(moved.lines[1].raw, "[Gb]la [Db]lo");

        let sharp = transpose_song(&parse("{key: F}\n[F]la"), 1, Spelling::Sharps);
        assert_eq!(sharp.meta("key"), Some("F#"));
        assert_eq!(sharp.lines[1].raw, "[F#]la");
    }
}
