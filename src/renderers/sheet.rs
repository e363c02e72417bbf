//! Display-ready view of a song shared by the HTML and text formatters
//!
//! Applies transposition, splits the song into sections and drops what is
//! not displayed (markers, metadata directives, `#` comments, control
//! directives). Runs of blank lines collapse to one and sections with
//! nothing left to show are skipped.

use std::borrow::Cow;

use super::FormatOptions;
use crate::models::{ChordSymbol, LineContent, NotationLine, SectionKind, SongModel, Spelling};
use crate::parse::directives::is_comment;
use crate::parse::segment;
use crate::transposition::{resolve_spelling, transpose_song};

/// Metadata shown in the header, in display order
const HEADER_META: [(&str, &str); 6] = [
    ("artist", "Artist"),
    ("composer", "Composer"),
    ("key", "Key"),
    ("capo", "Capo"),
    ("tempo", "Tempo"),
    ("time", "Time"),
];

/// One chord/lyric column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub chord: Option<String>,
    pub lyric: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    Plain,
    Italic,
    Boxed,
}

impl CommentStyle {
    fn from_directive(canonical: &str) -> Self {
        match canonical {
            "comment_italic" => CommentStyle::Italic,
            "comment_box" => CommentStyle::Boxed,
            _ => CommentStyle::Plain,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CommentStyle::Plain => "plain",
            CommentStyle::Italic => "italic",
            CommentStyle::Boxed => "box",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetLine {
    /// Line with at least one chord
    Chords(Vec<Cell>),
    /// Lyrics without chords
    Lyrics(String),
    Comment { text: String, style: CommentStyle },
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetSection {
    pub id: String,
    pub kind: SectionKind,
    /// `None` for the synthetic preamble or an unmarked song
    pub label: Option<String>,
    pub lines: Vec<SheetLine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    /// (label, value) pairs for the header
    pub meta: Vec<(&'static str, String)>,
    pub sections: Vec<SheetSection>,
    /// Distinct recognized chords after transposition
    pub chords: Vec<ChordSymbol>,
    pub spelling: Spelling,
}

/// The model as it should be displayed, transposed if requested
pub fn prepare<'a>(
    model: &'a SongModel,
    options: &FormatOptions,
) -> (Cow<'a, SongModel>, Spelling) {
    let spelling = resolve_spelling(model.key(), options.transpose, options.use_flats);
    if options.transpose.rem_euclid(12) == 0 && !options.use_flats {
        (Cow::Borrowed(model), spelling)
    } else {
        (Cow::Owned(transpose_song(model, options.transpose, spelling)), spelling)
    }
}

pub fn build_sheet(model: &SongModel, options: &FormatOptions) -> Sheet {
    let (song, spelling) = prepare(model, options);

    let sections = segment(&song)
        .into_iter()
        .filter_map(|section| {
            let lines = &song.lines[section.start_line..section.end_line];
            let mut out = Vec::with_capacity(lines.len());
            for line in lines {
                match display_line(line) {
                    Some(SheetLine::Blank) => {
                        if !matches!(out.last(), None | Some(SheetLine::Blank)) {
                            out.push(SheetLine::Blank);
                        }
                    }
                    Some(shown) => out.push(shown),
                    None => {}
                }
            }
            while matches!(out.last(), Some(SheetLine::Blank)) {
                out.pop();
            }
            let label = (!section.synthetic).then(|| section.label.clone());
            if out.is_empty() && label.is_none() {
                return None;
            }
            Some(SheetSection {
                id: section.id,
                kind: section.kind,
                label,
                lines: out,
            })
        })
        .collect();

    let meta = HEADER_META
        .iter()
        .filter_map(|(name, label)| song.meta(name).map(|v| (*label, v.to_string())))
        .collect();

    Sheet {
        title: song.title().map(str::to_string),
        subtitle: song.meta("subtitle").map(str::to_string),
        meta,
        sections,
        chords: song.used_chords(),
        spelling,
    }
}

fn display_line(line: &NotationLine) -> Option<SheetLine> {
    match &line.content {
        LineContent::Blank => Some(SheetLine::Blank),
        LineContent::Lyrics { pairs } => {
            if pairs.iter().any(|p| p.chord.is_some()) {
                Some(SheetLine::Chords(
                    pairs
                        .iter()
                        .map(|p| Cell {
                            chord: p.chord.as_ref().map(|c| c.raw.clone()),
                            lyric: p.lyric.clone(),
                        })
                        .collect(),
                ))
            } else {
                Some(SheetLine::Lyrics(line.lyrics_text()))
            }
        }
        LineContent::Directive(directive) => {
            if is_comment(&directive.canonical) {
                Some(SheetLine::Comment {
                    text: directive.value_or_empty().to_string(),
                    style: CommentStyle::from_directive(&directive.canonical),
                })
            } else if directive.canonical == "chorus" {
                Some(SheetLine::Comment {
                    text: "Chorus".to_string(),
                    style: CommentStyle::Italic,
                })
            } else {
                // Metadata, section markers and control directives
                None
            }
        }
        LineContent::SectionHeader { .. } | LineContent::Comment { .. } => None,
    }
}
