//! Line grammar for ChordPro-style song text
//!
//! Each physical line is classified on its own:
//!
//! ```text
//! line      := blank | comment | directive | header | lyrics
//! comment   := '#' any*
//! directive := '{' name (':' value)? '}'        (whole line)
//! header    := '[' section-word label* ']'       (whole line, not a chord)
//! lyrics    := (text | '[' chord ']')*
//! ```
//!
//! Parsing never fails. Brackets that do not close on the same line, empty
//! brackets and malformed directives all fall through to literal lyric text.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

use super::chord::is_chord;
use super::directives::{canonical_name, is_metadata};
use crate::models::{
    ChordLyricPair, ChordToken, Directive, LineContent, NotationLine, SectionKind, SongModel,
};

static DIRECTIVE_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_\-]*$").expect("valid directive name regex"));

/// Parse song text into a model
pub fn parse(text: &str) -> SongModel {
    let mut metadata = BTreeMap::new();
    let mut lines = Vec::new();

    for (index, raw) in text.split('\n').enumerate() {
        let content = parse_line(raw.strip_suffix('\r').unwrap_or(raw));

        if let LineContent::Directive(directive) = &content {
            if is_metadata(&directive.canonical) {
                if let Some(value) = &directive.value {
                    // last occurrence wins
                    metadata.insert(directive.canonical.clone(), value.clone());
                }
            }
        }

        lines.push(NotationLine {
            index,
            raw: raw.to_string(),
            content,
        });
    }

    log::debug!(
        "parsed {} lines, {} metadata entries",
        lines.len(),
        metadata.len()
    );

    SongModel { metadata, lines }
}

/// Classify and parse a single line (without its terminator)
pub fn parse_line(line: &str) -> LineContent {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return LineContent::Blank;
    }

    if let Some(rest) = trimmed.strip_prefix('#') {
        return LineContent::Comment {
            text: rest.to_string(),
        };
    }

    if let Some(directive) = parse_directive(trimmed) {
        return LineContent::Directive(directive);
    }

    if let Some(label) = parse_section_header(trimmed) {
        return LineContent::SectionHeader { label };
    }

    LineContent::Lyrics {
        pairs: parse_pairs(line),
    }
}

/// `{name}` or `{name: value}` filling the whole (trimmed) line
pub fn parse_directive(trimmed: &str) -> Option<Directive> {
    let inner = trimmed.strip_prefix('{')?.strip_suffix('}')?;
    if inner.contains(['{', '}']) {
        return None;
    }

    let (name, value) = match inner.split_once(':') {
        Some((name, value)) => (name.trim(), Some(value.trim().to_string())),
        None => (inner.trim(), None),
    };

    if !DIRECTIVE_NAME_RE.is_match(name) {
        return None;
    }

    Some(Directive {
        name: name.to_string(),
        canonical: canonical_name(name),
        value,
    })
}

/// `[Verse 2]`-style label line; the label must not itself be a chord
fn parse_section_header(trimmed: &str) -> Option<String> {
    let inner = trimmed.strip_prefix('[')?.strip_suffix(']')?;
    if inner.contains(['[', ']']) || is_chord(inner) {
        return None;
    }
    let first_word = inner.split_whitespace().next()?;
    let word = first_word.trim_end_matches(|c: char| c == ':' || c.is_ascii_digit());
    SectionKind::from_word(word)?;
    Some(inner.trim().to_string())
}

/// Split a lyric line into chord/lyric pairs
fn parse_pairs(line: &str) -> Vec<ChordLyricPair> {
    let mut pairs = Vec::new();
    let mut chord: Option<ChordToken> = None;
    let mut lyric = String::new();
    let mut rest = line;

    while let Some(open) = rest.find('[') {
        let after = &rest[open + 1..];
        let close = after.find(['[', ']']).filter(|&i| after[i..].starts_with(']'));

        match close {
            Some(close) if !after[..close].trim().is_empty() => {
                lyric.push_str(&rest[..open]);
                if chord.is_some() || !lyric.is_empty() {
                    pairs.push(ChordLyricPair {
                        chord: chord.take(),
                        lyric: std::mem::take(&mut lyric),
                    });
                }
                chord = Some(ChordToken::new(&after[..close]));
                rest = &after[close + 1..];
            }
            _ => {
                // unbalanced or empty bracket stays literal
                lyric.push_str(&rest[..=open]);
                rest = after;
            }
        }
    }
    lyric.push_str(rest);

    if chord.is_some() || !lyric.is_empty() {
        pairs.push(ChordLyricPair { chord, lyric });
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs_of(line: &str) -> Vec<(Option<String>, String)> {
        match parse_line(line) {
            LineContent::Lyrics { pairs } => pairs
                .into_iter()
                .map(|p| (p.chord.map(|c| c.raw), p.lyric))
                .collect(),
            other => panic!("expected lyrics, got {:?}", other),
        }
    }

    #[test]
    fn test_chorded_line() {
        assert_eq!(
            pairs_of("[G]Amazing [D]grace"),
            vec![
                (Some("G".to_string()), "Amazing ".to_string()),
                (Some("D".to_string()), "grace".to_string()),
            ]
        );
    }

    #[test]
    fn test_leading_lyric_without_chord() {
        assert_eq!(
            pairs_of("How [C]sweet"),
            vec![
                (None, "How ".to_string()),
                (Some("C".to_string()), "sweet".to_string()),
            ]
        );
    }

    #[test]
    fn test_unbalanced_bracket_is_literal() {
        assert_eq!(pairs_of("oops [G sound"), vec![(None, "oops [G sound".to_string())]);
        assert_eq!(
            pairs_of("a [ b [C]d"),
            vec![
                (None, "a [ b ".to_string()),
                (Some("C".to_string()), "d".to_string()),
            ]
        );
        assert_eq!(pairs_of("empty [] chord"), vec![(None, "empty [] chord".to_string())]);
    }

    #[test]
    fn test_unrecognized_chord_is_kept_raw() {
        match parse_line("[N.C.]rest") {
            LineContent::Lyrics { pairs } => {
                let chord = pairs[0].chord.as_ref().unwrap();
                assert_eq!(chord.raw, "N.C.");
                assert!(!chord.is_recognized());
            }
            other => panic!("expected lyrics, got {:?}", other),
        }
    }

    #[test]
    fn test_directive_parsing() {
        let d = parse_directive("{ Title :  Amazing Grace }").unwrap();
        assert_eq!(d.name, "Title");
        assert_eq!(d.canonical, "title");
        assert_eq!(d.value.as_deref(), Some("Amazing Grace"));

        let d = parse_directive("{soc}").unwrap();
        assert_eq!(d.canonical, "start_of_chorus");
        assert_eq!(d.value, None);

        assert!(parse_directive("{}").is_none());
        assert!(parse_directive("{: x}").is_none());
        assert!(parse_directive("{a {b}}").is_none());
    }

    #[test]
    fn test_line_classification() {
        assert_eq!(parse_line("   "), LineContent::Blank);
        assert_eq!(
            parse_line("# note to self"),
            LineContent::Comment {
                text: " note to self".to_string()
            }
        );
        assert_eq!(
            parse_line("[Verse 1]"),
            LineContent::SectionHeader {
                label: "Verse 1".to_string()
            }
        );
        assert!(matches!(parse_line("[Am]"), LineContent::Lyrics { .. }));
        assert!(matches!(parse_line("[Whatever]"), LineContent::Lyrics { .. }));
    }

    #[test]
    fn test_metadata_last_wins() {
        let song = parse("{title: First}\n{t: Second}\n{key: G}");
        assert_eq!(song.title(), Some("Second"));
        assert_eq!(song.meta("key"), Some("G"));
        assert_eq!(song.lines.len(), 3);
    }

    #[test]
    fn test_crlf_lines_keep_raw_text() {
        let song = parse("{title: X}\r\n[C]la\r\n");
        assert_eq!(song.title(), Some("X"));
        assert_eq!(song.lines[1].raw, "[C]la\r");
        assert_eq!(song.lines[1].lyrics_text(), "la");
    }
}
