//! Capo solving
//!
//! For a target key, every open triad shape of the same mode is tried at
//! capo frets 0-11; pairs whose transposed shape equals the target key are
//! kept, lowest capo first, then easiest shape first.

use serde::{Deserialize, Serialize};

use super::shapes::{triad_shapes, Difficulty};
use super::transpose::transpose_key;
use crate::models::Key;

/// One way to play in the target key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapoOption {
    pub capo: u8,
    /// Shape fingered with the capo on ("G", "Em")
    pub shape: String,
    pub difficulty: Difficulty,
}

/// All (shape, capo) combinations that sound in `target`
pub fn capo_options(target: Key) -> Vec<CapoOption> {
    let mut options = Vec::new();
    for (shape, chord) in triad_shapes() {
        let shape_key = Key {
            tonic: chord.root,
            minor: chord.is_minor(),
        };
        if shape_key.minor != target.minor {
            continue;
        }
        for capo in 0u8..12 {
            if transpose_key(shape_key, capo as i32) == target {
                options.push(CapoOption {
                    capo,
                    shape: shape.name.to_string(),
                    difficulty: shape.difficulty,
                });
            }
        }
    }
    options.sort_by(|a, b| a.capo.cmp(&b.capo).then(a.difficulty.cmp(&b.difficulty)));
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_key;

    #[test]
    fn test_open_key_needs_no_capo() {
        let options = capo_options(parse_key("G").unwrap());
        assert_eq!(options[0].capo, 0);
        assert_eq!(options[0].shape, "G");
    }

    #[test]
    fn test_bb_major() {
        let options = capo_options(parse_key("Bb").unwrap());
        let pairs: Vec<(u8, &str)> = options.iter().map(|o| (o.capo, o.shape.as_str())).collect();
        assert_eq!(
            pairs,
            vec![(1, "A"), (3, "G"), (5, "F"), (6, "E"), (8, "D"), (10, "C"), (11, "B")]
        );
    }

    #[test]
    fn test_minor_key_uses_minor_shapes() {
        let options = capo_options(parse_key("F#m").unwrap());
        assert!(!options.is_empty());
        assert!(options.iter().all(|o| o.shape.ends_with('m')));
        assert_eq!(options[0].capo, 1);
        assert_eq!(options[0].shape, "Fm");
    }

    #[test]
    fn test_sorted_by_capo() {
        // every triad shape lands on exactly one fret, so sort order is by capo
        let options = capo_options(parse_key("C").unwrap());
        assert!(options.windows(2).all(|w| w[0].capo <= w[1].capo));
        assert_eq!(options.len(), 7);
    }
}
