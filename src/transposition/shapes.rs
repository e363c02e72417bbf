//! Open-position guitar chord shapes
//!
//! Used for chord diagrams in screen HTML and as the candidate shapes for
//! capo solving. Frets are low E to high e, `x` = muted string.

use serde::{Deserialize, Serialize};

use crate::models::ChordSymbol;
use crate::parse::parse_chord;

/// Fingering difficulty, ordered easy < medium < hard
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChordShape {
    pub name: &'static str,
    pub frets: &'static str,
    pub difficulty: Difficulty,
}

const fn shape(name: &'static str, frets: &'static str, difficulty: Difficulty) -> ChordShape {
    ChordShape {
        name,
        frets,
        difficulty,
    }
}

pub static OPEN_SHAPES: &[ChordShape] = &[
    // major triads
    shape("C", "x32010", Difficulty::Easy),
    shape("A", "x02220", Difficulty::Easy),
    shape("G", "320003", Difficulty::Easy),
    shape("E", "022100", Difficulty::Easy),
    shape("D", "xx0232", Difficulty::Easy),
    shape("F", "133211", Difficulty::Medium),
    shape("B", "x24442", Difficulty::Hard),
    // minor triads
    shape("Am", "x02210", Difficulty::Easy),
    shape("Em", "022000", Difficulty::Easy),
    shape("Dm", "xx0231", Difficulty::Easy),
    shape("Bm", "x24432", Difficulty::Medium),
    shape("Fm", "133111", Difficulty::Hard),
    // sevenths and colour chords, diagrams only
    shape("G7", "320001", Difficulty::Easy),
    shape("C7", "x32310", Difficulty::Medium),
    shape("D7", "xx0212", Difficulty::Easy),
    shape("A7", "x02020", Difficulty::Easy),
    shape("E7", "020100", Difficulty::Easy),
    shape("B7", "x21202", Difficulty::Medium),
    shape("Am7", "x02010", Difficulty::Easy),
    shape("Em7", "022030", Difficulty::Easy),
    shape("Dm7", "xx0211", Difficulty::Easy),
    shape("Cmaj7", "x32000", Difficulty::Easy),
    shape("Fmaj7", "xx3210", Difficulty::Easy),
    shape("Asus2", "x02200", Difficulty::Easy),
    shape("Asus4", "x02230", Difficulty::Easy),
    shape("Dsus2", "xx0230", Difficulty::Easy),
    shape("Dsus4", "xx0233", Difficulty::Easy),
    shape("Esus4", "022200", Difficulty::Easy),
    shape("Cadd9", "x32030", Difficulty::Easy),
];

/// Open shape for a chord, matched on pitch classes and suffix, so any
/// enharmonic spelling of a listed chord finds it
pub fn shape_for(chord: &ChordSymbol) -> Option<&'static ChordShape> {
    OPEN_SHAPES
        .iter()
        .find(|s| parse_chord(s.name).as_ref() == Some(chord))
}

/// Plain major and minor triad shapes (capo candidates)
pub fn triad_shapes() -> impl Iterator<Item = (&'static ChordShape, ChordSymbol)> {
    OPEN_SHAPES.iter().filter_map(|s| {
        let chord = parse_chord(s.name)?;
        matches!(chord.suffix.as_str(), "" | "m").then_some((s, chord))
    })
}
