//! Chord and key value types
//!
//! Pitches are stored as positions on the 12-step chromatic ring, never as
//! spelled names. Spelling (sharps vs flats) is chosen when a chord is
//! rendered, so two enharmonic chords compare equal.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::transposition::chromatic::{note_name, prefers_flats};

/// One of the 12 chromatic positions, 0 = C
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PitchClass(u8);

impl PitchClass {
    pub const C: PitchClass = PitchClass(0);

    /// Build from any integer, wrapping onto the ring
    pub fn new(semitone: i32) -> Self {
        PitchClass(semitone.rem_euclid(12) as u8)
    }

    pub fn index(self) -> u8 {
        self.0
    }

    /// Rotate around the chromatic ring by any number of semitones
    pub fn rotate(self, semitones: i32) -> Self {
        PitchClass::new(self.0 as i32 + semitones.rem_euclid(12))
    }

    /// Name of this pitch in the given spelling
    pub fn name(self, spelling: Spelling) -> &'static str {
        note_name(self, spelling)
    }

    /// True for the five black-key positions
    pub fn is_accidental(self) -> bool {
        matches!(self.0, 1 | 3 | 6 | 8 | 10)
    }
}

/// Enharmonic spelling policy for black-key positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spelling {
    #[default]
    Sharps,
    Flats,
}

/// A parsed chord symbol: root, quality/extension suffix, optional slash bass
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChordSymbol {
    pub root: PitchClass,
    /// Everything between the root and the slash ("m7", "sus4", "maj7(#11)")
    pub suffix: String,
    pub bass: Option<PitchClass>,
}

impl ChordSymbol {
    pub fn new(root: PitchClass, suffix: impl Into<String>, bass: Option<PitchClass>) -> Self {
        Self {
            root,
            suffix: suffix.into(),
            bass,
        }
    }

    /// Whether the suffix marks a minor triad ("m", "m7", "min9" but not "maj7")
    pub fn is_minor(&self) -> bool {
        let s = self.suffix.as_str();
        (s.starts_with('m') && !s.starts_with("maj")) || s.starts_with('-')
    }

    /// Render with an explicit spelling
    pub fn to_string_with(&self, spelling: Spelling) -> String {
        let mut out = String::with_capacity(6);
        out.push_str(self.root.name(spelling));
        out.push_str(&self.suffix);
        if let Some(bass) = self.bass {
            out.push('/');
            out.push_str(bass.name(spelling));
        }
        out
    }
}

impl fmt::Display for ChordSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with(Spelling::Sharps))
    }
}

/// A musical key: tonic plus a minor tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Key {
    pub tonic: PitchClass,
    pub minor: bool,
}

impl Key {
    pub fn major(tonic: PitchClass) -> Self {
        Self { tonic, minor: false }
    }

    pub fn minor(tonic: PitchClass) -> Self {
        Self { tonic, minor: true }
    }

    /// Whether this key is conventionally written with flats
    pub fn prefers_flats(&self) -> bool {
        prefers_flats(*self)
    }

    /// The spelling this key is conventionally written in
    pub fn spelling(&self) -> Spelling {
        if self.prefers_flats() {
            Spelling::Flats
        } else {
            Spelling::Sharps
        }
    }

    pub fn to_string_with(&self, spelling: Spelling) -> String {
        let mut out = self.tonic.name(spelling).to_string();
        if self.minor {
            out.push('m');
        }
        out
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with(self.spelling()))
    }
}

/// A bracketed chord annotation as it appeared in the source
///
/// `parsed` is `None` when the text does not follow the chord grammar
/// (e.g. `[N.C.]` or `[*riff]`); such tokens are carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordToken {
    pub raw: String,
    pub parsed: Option<ChordSymbol>,
}

impl ChordToken {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let parsed = crate::parse::chord::parse_chord(&raw);
        Self { raw, parsed }
    }

    pub fn is_recognized(&self) -> bool {
        self.parsed.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_class_wraps() {
        assert_eq!(PitchClass::new(12), PitchClass::C);
        assert_eq!(PitchClass::new(-1).index(), 11);
        assert_eq!(PitchClass::new(7).rotate(-8).index(), 11);
    }

    #[test]
    fn test_chord_display() {
        let chord = ChordSymbol::new(PitchClass::new(10), "m7", Some(PitchClass::new(5)));
        assert_eq!(chord.to_string(), "A#m7/F");
        assert_eq!(chord.to_string_with(Spelling::Flats), "Bbm7/F");
    }

    #[test]
    fn test_minor_detection() {
        assert!(ChordSymbol::new(PitchClass::C, "m7", None).is_minor());
        assert!(ChordSymbol::new(PitchClass::C, "min", None).is_minor());
        assert!(!ChordSymbol::new(PitchClass::C, "maj7", None).is_minor());
        assert!(!ChordSymbol::new(PitchClass::C, "7", None).is_minor());
    }

    #[test]
    fn test_key_display_uses_its_own_spelling() {
        assert_eq!(Key::major(PitchClass::new(10)).to_string(), "Bb");
        assert_eq!(Key::major(PitchClass::new(6)).to_string(), "F#");
        assert_eq!(Key::minor(PitchClass::new(3)).to_string(), "Ebm");
    }
}
