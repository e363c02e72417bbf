//! Fixed chromatic lookup tables
//!
//! Index = semitones above C. Black-key positions have a sharp and a flat
//! spelling; the rest are identical in both tables.
//!
//!   0=C 1=C#/Db 2=D 3=D#/Eb 4=E 5=F 6=F#/Gb 7=G 8=G#/Ab 9=A 10=A#/Bb 11=B

use crate::models::{Key, PitchClass, Spelling};

const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

const FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Major tonics written with flats: F Bb Eb Ab Db
const FLAT_MAJOR_TONICS: [u8; 5] = [5, 10, 3, 8, 1];

/// Minor tonics written with flats: Dm Gm Cm Fm Bbm Ebm
const FLAT_MINOR_TONICS: [u8; 6] = [2, 7, 0, 5, 10, 3];

/// Name of a pitch class in the given spelling
pub fn note_name(pitch: PitchClass, spelling: Spelling) -> &'static str {
    let idx = pitch.index() as usize;
    match spelling {
        Spelling::Sharps => SHARP_NAMES[idx],
        Spelling::Flats => FLAT_NAMES[idx],
    }
}

/// Semitone offset of a natural note letter
pub fn letter_semitone(letter: char) -> Option<i32> {
    match letter {
        'C' => Some(0),
        'D' => Some(2),
        'E' => Some(4),
        'F' => Some(5),
        'G' => Some(7),
        'A' => Some(9),
        'B' => Some(11),
        _ => None,
    }
}

/// Pitch class for a letter plus accidental string ("", "#", "b")
///
/// Wraps across the ring, so "Cb" is B and "E#" is F.
pub fn pitch_from_parts(letter: char, accidental: &str) -> Option<PitchClass> {
    let base = letter_semitone(letter)?;
    let shift: i32 = accidental
        .chars()
        .map(|c| match c {
            '#' | '♯' => 1,
            'b' | '♭' => -1,
            _ => 0,
        })
        .sum();
    Some(PitchClass::new(base + shift))
}

/// Whether a key is conventionally spelled with flats
pub fn prefers_flats(key: Key) -> bool {
    let tonic = key.tonic.index();
    if key.minor {
        FLAT_MINOR_TONICS.contains(&tonic)
    } else {
        FLAT_MAJOR_TONICS.contains(&tonic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_agree_on_white_keys() {
        for i in 0..12 {
            let pc = PitchClass::new(i);
            if !pc.is_accidental() {
                assert_eq!(note_name(pc, Spelling::Sharps), note_name(pc, Spelling::Flats));
            }
        }
    }

    #[test]
    fn test_pitch_from_parts_wraps() {
        assert_eq!(pitch_from_parts('C', "b"), Some(PitchClass::new(11)));
        assert_eq!(pitch_from_parts('E', "#"), Some(PitchClass::new(5)));
        assert_eq!(pitch_from_parts('B', "b"), Some(PitchClass::new(10)));
        assert_eq!(pitch_from_parts('H', ""), None);
    }

    #[test]
    fn test_flat_keys() {
        assert!(prefers_flats(Key::major(PitchClass::new(5))));
        assert!(prefers_flats(Key::minor(PitchClass::new(2))));
        assert!(!prefers_flats(Key::major(PitchClass::new(7))));
        assert!(!prefers_flats(Key::minor(PitchClass::new(9))));
    }
}
