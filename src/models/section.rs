//! Labeled song sections
//!
//! Sections are derived from a `SongModel` by `parse::segment` and carry the
//! literal source text of their span, so they can be rendered independently
//! (windowed display) or reassembled with `parse::sections_to_text`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a song section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Verse,
    Chorus,
    Bridge,
    Intro,
    Outro,
    Custom,
}

impl SectionKind {
    /// Resolve a section word ("chorus", "Pre-Chorus", "sov" suffix "verse")
    pub fn from_word(word: &str) -> Option<Self> {
        match word.to_ascii_lowercase().as_str() {
            "verse" => Some(SectionKind::Verse),
            "chorus" | "refrain" => Some(SectionKind::Chorus),
            "bridge" => Some(SectionKind::Bridge),
            "intro" => Some(SectionKind::Intro),
            "outro" | "ending" | "coda" => Some(SectionKind::Outro),
            "pre-chorus" | "prechorus" | "tag" | "interlude" | "instrumental" | "solo" | "tab"
            | "grid" => Some(SectionKind::Custom),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Verse => "verse",
            SectionKind::Chorus => "chorus",
            SectionKind::Bridge => "bridge",
            SectionKind::Intro => "intro",
            SectionKind::Outro => "outro",
            SectionKind::Custom => "custom",
        }
    }

    /// Label used when the source gives none
    pub fn default_label(&self) -> &'static str {
        match self {
            SectionKind::Verse => "Verse",
            SectionKind::Chorus => "Chorus",
            SectionKind::Bridge => "Bridge",
            SectionKind::Intro => "Intro",
            SectionKind::Outro => "Outro",
            SectionKind::Custom => "Section",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A contiguous labeled span of the song
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub kind: SectionKind,
    pub label: String,
    /// Literal source text of the span, lines joined with `\n`
    pub content: String,
    /// First buffer line of the span
    pub start_line: usize,
    /// One past the last buffer line of the span
    pub end_line: usize,
    /// Created by the segmenter rather than by a marker in the source
    pub synthetic: bool,
}
