//! Parsed song model
//!
//! A `SongModel` is produced by `parse::parse` and never mutated afterwards;
//! editing the buffer produces a fresh model on the next parse.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::chord::{ChordSymbol, ChordToken, Key};
use crate::parse::chord::parse_key;

/// One chord annotation and the lyric fragment that follows it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordLyricPair {
    pub chord: Option<ChordToken>,
    pub lyric: String,
}

/// A `{name: value}` token occupying a whole line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directive {
    /// Name as written, trimmed ("t", "Title", "soc")
    pub name: String,
    /// Canonical lowercase name after alias resolution ("title", "start_of_chorus")
    pub canonical: String,
    pub value: Option<String>,
}

/// What a physical line contains
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LineContent {
    /// Lyrics with inline chords (possibly chords only, possibly lyrics only)
    Lyrics { pairs: Vec<ChordLyricPair> },
    Directive(Directive),
    /// A bare `[Verse 1]` style label line
    SectionHeader { label: String },
    /// Source comment starting with `#`
    Comment { text: String },
    Blank,
}

impl Directive {
    pub fn value_or_empty(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }

    /// Normalized `{name: value}` text, keeping the name as written
    pub fn to_source(&self) -> String {
        match &self.value {
            Some(value) => format!("{{{}: {}}}", self.name, value),
            None => format!("{{{}}}", self.name),
        }
    }
}

impl LineContent {
    /// ChordPro text for this content
    ///
    /// Re-parsing the result yields the same content; only whitespace around
    /// directives and header labels is normalized.
    pub fn to_source(&self) -> String {
        match self {
            LineContent::Lyrics { pairs } => {
                let mut out = String::new();
                for pair in pairs {
                    if let Some(chord) = &pair.chord {
                        out.push('[');
                        out.push_str(&chord.raw);
                        out.push(']');
                    }
                    out.push_str(&pair.lyric);
                }
                out
            }
            LineContent::Directive(directive) => directive.to_source(),
            LineContent::SectionHeader { label } => format!("[{}]", label),
            LineContent::Comment { text } => format!("#{}", text),
            LineContent::Blank => String::new(),
        }
    }
}

/// One physical line of the buffer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotationLine {
    /// Zero-based line index in the buffer
    pub index: usize,
    /// Literal text of the line without the trailing `\n`
    pub raw: String,
    pub content: LineContent,
}

impl NotationLine {
    pub fn pairs(&self) -> &[ChordLyricPair] {
        match &self.content {
            LineContent::Lyrics { pairs } => pairs,
            _ => &[],
        }
    }

    pub fn has_chords(&self) -> bool {
        self.pairs().iter().any(|p| p.chord.is_some())
    }

    pub fn directive(&self) -> Option<&Directive> {
        match &self.content {
            LineContent::Directive(d) => Some(d),
            _ => None,
        }
    }

    /// Lyric text with chords stripped
    pub fn lyrics_text(&self) -> String {
        self.pairs().iter().map(|p| p.lyric.as_str()).collect()
    }
}

/// Parsed song: metadata plus every physical line in order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SongModel {
    /// Canonical metadata name → value (last directive wins)
    pub metadata: BTreeMap<String, String>,
    pub lines: Vec<NotationLine>,
}

impl SongModel {
    pub fn title(&self) -> Option<&str> {
        self.meta("title")
    }

    pub fn meta(&self, name: &str) -> Option<&str> {
        self.metadata.get(name).map(String::as_str)
    }

    /// The `{key: ...}` metadata, if present and recognizable
    pub fn key(&self) -> Option<Key> {
        self.meta("key").and_then(parse_key)
    }

    /// All chord tokens in document order
    pub fn chords(&self) -> impl Iterator<Item = &ChordToken> {
        self.lines
            .iter()
            .flat_map(|l| l.pairs().iter())
            .filter_map(|p| p.chord.as_ref())
    }

    /// Distinct recognized chords in order of first appearance
    pub fn used_chords(&self) -> Vec<ChordSymbol> {
        let mut seen: Vec<ChordSymbol> = Vec::new();
        for chord in self.chords().filter_map(|c| c.parsed.as_ref()) {
            if !seen.contains(chord) {
                seen.push(chord.clone());
            }
        }
        seen
    }
}
