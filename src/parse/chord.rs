//! Chord symbol grammar
//!
//! root letter, optional accidental, optional quality, optional degree
//! number, any run of extensions/alterations, optional slash bass:
//!
//!   `C`, `F#m`, `Bbmaj7`, `Am7b5`, `C7sus4`, `Dm7(b9,#11)/F`, `G/B`
//!
//! Anything outside the grammar yields `None` and is treated as literal
//! text by callers.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{ChordSymbol, Key};
use crate::transposition::chromatic::pitch_from_parts;

static CHORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(?P<root>[A-G])(?P<acc>[#b♯♭])?",
        r"(?P<suffix>",
        r"(?:maj|min|dim|aug|sus|add|m|M|\+|-|°|ø|o)?",
        r"(?:\d{1,2})?",
        r"(?:sus[24]?|add\d{1,2}|maj\d{0,2}|[#b+\-]\d{1,2}|\([^)/\s]*\)|alt|no\d)*",
        r")",
        r"(?:/(?P<bass>[A-G])(?P<bass_acc>[#b♯♭])?)?$",
    ))
    .expect("chord grammar is a valid regex")
});

static KEY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<tonic>[A-G])(?P<acc>[#b♯♭])?\s*(?P<mode>m|min|minor|maj|major)?$")
        .expect("key grammar is a valid regex")
});

/// Parse a chord symbol, `None` when it does not follow the grammar
pub fn parse_chord(text: &str) -> Option<ChordSymbol> {
    let caps = CHORD_RE.captures(text.trim())?;
    let root = pitch_from_parts(
        caps.name("root")?.as_str().chars().next()?,
        caps.name("acc").map_or("", |m| m.as_str()),
    )?;
    let bass = match caps.name("bass") {
        Some(bass) => Some(pitch_from_parts(
            bass.as_str().chars().next()?,
            caps.name("bass_acc").map_or("", |m| m.as_str()),
        )?),
        None => None,
    };
    let suffix = caps.name("suffix").map_or("", |m| m.as_str());
    Some(ChordSymbol::new(root, suffix, bass))
}

/// Whether text is a chord under the grammar
pub fn is_chord(text: &str) -> bool {
    CHORD_RE.is_match(text.trim())
}

/// Parse a key name: "G", "Bb", "F#m", "C minor"
pub fn parse_key(text: &str) -> Option<Key> {
    let caps = KEY_RE.captures(text.trim())?;
    let tonic = pitch_from_parts(
        caps.name("tonic")?.as_str().chars().next()?,
        caps.name("acc").map_or("", |m| m.as_str()),
    )?;
    let minor = matches!(
        caps.name("mode").map(|m| m.as_str()),
        Some("m") | Some("min") | Some("minor")
    );
    Some(Key { tonic, minor })
}
