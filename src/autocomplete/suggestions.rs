//! Suggestion catalogs and ranking
//!
//! Directive names come from the directive catalog and carry a category for
//! grouping. Chord suggestions mix the chords already used in the song with a
//! fixed set of common chords. Inside `{key: ` the value position offers the
//! 24 major and minor keys.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::AutocompleteContext;
use crate::models::{Key, PitchClass, SongModel};
use crate::parse::directives::{canonical_name, DirectiveCategory, DIRECTIVES};

const COMMON_ROOTS: [&str; 12] = [
    "C", "C#", "D", "Eb", "E", "F", "F#", "G", "Ab", "A", "Bb", "B",
];
const COMMON_QUALITIES: [&str; 10] =
    ["", "m", "7", "m7", "maj7", "sus2", "sus4", "dim", "aug", "add9"];

/// One entry in the suggestion list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    /// Text shown in the list
    pub label: String,
    /// Replacement for everything between the trigger bracket and the cursor
    pub insert_text: String,
    /// Directive grouping; `None` for chords and key values
    pub category: Option<DirectiveCategory>,
    pub detail: Option<String>,
}

/// Ranked suggestions for a context, at most `max` entries
pub fn suggestions_for(
    ctx: &AutocompleteContext,
    model: Option<&SongModel>,
    max: usize,
) -> Vec<Suggestion> {
    let mut out = match ctx.trigger_char {
        '{' => match ctx.filter_text.split_once(':') {
            Some((name, value)) => directive_value_suggestions(name, value),
            None => directive_suggestions(&ctx.filter_text),
        },
        _ => chord_suggestions(&ctx.filter_text, model),
    };
    out.truncate(max);
    out
}

/// Match quality: 0 = prefix, 1 = substring; case-insensitive
fn match_rank(candidate: &str, filter: &str) -> Option<u8> {
    let candidate = candidate.to_lowercase();
    let filter = filter.trim().to_lowercase();
    if candidate.starts_with(&filter) {
        Some(0)
    } else if candidate.contains(&filter) {
        Some(1)
    } else {
        None
    }
}

/// Order by rank, then label
fn rank(mut scored: Vec<(u8, Suggestion)>) -> Vec<Suggestion> {
    scored.sort_by(|(ra, a), (rb, b)| ra.cmp(rb).then_with(|| a.label.cmp(&b.label)));
    scored.into_iter().map(|(_, s)| s).collect()
}

fn directive_suggestions(filter: &str) -> Vec<Suggestion> {
    let scored = DIRECTIVES
        .iter()
        .filter_map(|spec| {
            let best = std::iter::once(spec.name)
                .chain(spec.aliases.iter().copied())
                .filter_map(|name| match_rank(name, filter))
                .min()?;
            let insert_text = if spec.takes_value {
                format!("{}: ", spec.name)
            } else {
                format!("{}}}", spec.name)
            };
            Some((
                best,
                Suggestion {
                    label: spec.name.to_string(),
                    insert_text,
                    category: Some(spec.category),
                    detail: Some(spec.description.to_string()),
                },
            ))
        })
        .collect();
    rank(scored)
}

fn directive_value_suggestions(name: &str, value: &str) -> Vec<Suggestion> {
    if canonical_name(name) != "key" {
        return Vec::new();
    }
    let written = name.trim();
    let scored = all_keys()
        .into_iter()
        .filter_map(|key| {
            let label = key.to_string();
            let r = match_rank(&label, value)?;
            Some((
                r,
                Suggestion {
                    insert_text: format!("{}: {}}}", written, label),
                    label,
                    category: None,
                    detail: None,
                },
            ))
        })
        .collect();
    rank(scored)
}

fn all_keys() -> Vec<Key> {
    (0..12)
        .map(|i| Key::major(PitchClass::new(i)))
        .chain((0..12).map(|i| Key::minor(PitchClass::new(i))))
        .collect()
}

fn chord_suggestions(filter: &str, model: Option<&SongModel>) -> Vec<Suggestion> {
    let mut candidates: BTreeSet<String> = COMMON_ROOTS
        .iter()
        .flat_map(|root| COMMON_QUALITIES.iter().map(move |q| format!("{}{}", root, q)))
        .collect();
    if let Some(model) = model {
        let spelling = model.key().map(|k| k.spelling()).unwrap_or_default();
        for chord in model.used_chords() {
            candidates.insert(chord.to_string_with(spelling));
        }
    }

    let scored = candidates
        .into_iter()
        .filter_map(|chord| {
            let r = match_rank(&chord, filter)?;
            Some((
                r,
                Suggestion {
                    insert_text: format!("{}]", chord),
                    label: chord,
                    category: None,
                    detail: None,
                },
            ))
        })
        .collect();
    rank(scored)
}
