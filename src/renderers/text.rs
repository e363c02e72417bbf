//! Plain-text formatter
//!
//! Chorded lines become two rows, chords above lyrics. Each chord/lyric
//! column is as wide as its lyric, or one wider than its chord when the chord
//! is the longer of the two, so consecutive chords never touch.

use super::sheet::{build_sheet, Cell, CommentStyle, SheetLine};
use super::{FormatOptions, Formatter, OutputKind};
use crate::error::Result;
use crate::models::SongModel;

pub struct TextFormatter {
    options: FormatOptions,
}

impl TextFormatter {
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }
}

impl Formatter for TextFormatter {
    fn kind(&self) -> OutputKind {
        OutputKind::Text
    }

    fn options(&self) -> &FormatOptions {
        &self.options
    }

    fn format(&self, model: &SongModel) -> Result<String> {
        let sheet = build_sheet(model, &self.options);
        let mut blocks: Vec<Vec<String>> = Vec::new();

        let mut header = Vec::new();
        header.extend(sheet.title.clone());
        header.extend(sheet.subtitle.clone());
        if !sheet.meta.is_empty() {
            let meta: Vec<String> = sheet
                .meta
                .iter()
                .map(|(label, value)| format!("{}: {}", label, value))
                .collect();
            header.push(meta.join(" | "));
        }
        if !header.is_empty() {
            blocks.push(header);
        }

        for section in &sheet.sections {
            let mut out = Vec::new();
            if let Some(label) = &section.label {
                out.push(format!("[{}]", label));
            }
            for line in &section.lines {
                match line {
                    SheetLine::Chords(cells) => {
                        let (chords, lyrics) = chord_rows(cells);
                        out.push(chords);
                        if !lyrics.is_empty() {
                            out.push(lyrics);
                        }
                    }
                    SheetLine::Lyrics(text) => out.push(text.trim_end().to_string()),
                    SheetLine::Comment { text, style } => out.push(match style {
                        CommentStyle::Boxed => format!("[ {} ]", text),
                        _ => format!("({})", text),
                    }),
                    SheetLine::Blank => out.push(String::new()),
                }
            }
            blocks.push(out);
        }

        Ok(blocks
            .into_iter()
            .map(|block| block.join("\n"))
            .collect::<Vec<_>>()
            .join("\n\n"))
    }
}

/// Chord row and lyric row for one chorded line, right-trimmed
pub fn chord_rows(cells: &[Cell]) -> (String, String) {
    let mut chords = String::new();
    let mut lyrics = String::new();
    for cell in cells {
        let chord = cell.chord.as_deref().unwrap_or("");
        let chord_len = chord.chars().count();
        let lyric_len = cell.lyric.chars().count();
        let width = if chord_len > 0 && chord_len >= lyric_len {
            chord_len + 1
        } else {
            lyric_len
        };
        chords.push_str(chord);
        chords.extend(std::iter::repeat(' ').take(width - chord_len));
        lyrics.push_str(&cell.lyric);
        lyrics.extend(std::iter::repeat(' ').take(width - lyric_len));
    }
    (chords.trim_end().to_string(), lyrics.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;

    fn cell(chord: Option<&str>, lyric: &str) -> Cell {
        Cell {
            chord: chord.map(str::to_string),
            lyric: lyric.to_string(),
        }
    }

    #[test]
    fn test_chord_rows_align_over_syllables() {
        let (chords, lyrics) = chord_rows(&[cell(Some("A"), "Amazing "), cell(Some("E"), "grace")]);
        assert_eq!(chords, "A       E");
        assert_eq!(lyrics, "Amazing grace");
        assert_eq!(chords.find('E'), lyrics.find("grace"));
    }

    #[test]
    fn test_long_chords_push_lyrics_apart() {
        let (chords, lyrics) = chord_rows(&[
            cell(None, "Oh "),
            cell(Some("Cmaj7"), "la"),
            cell(Some("G"), "di"),
        ]);
        assert_eq!(chords, "   Cmaj7 G");
        assert_eq!(lyrics, "Oh la    di");
    }

    #[test]
    fn test_chord_only_line() {
        let (chords, lyrics) = chord_rows(&[cell(Some("G"), " "), cell(Some("D"), "")]);
        assert_eq!(chords, "G D");
        assert_eq!(lyrics, "");
    }

    #[test]
    fn test_text_document() {
        let model = parse(
            concat!(
                "{title: Song}\n{artist: Me}\n{key: C}\n\n",
                "{c: Intro riff}\n[Verse]\n[C]one [G]two\nplain words",
            ),
        );
        let text = TextFormatter::new(FormatOptions::default()).format(&model).unwrap();
        assert_eq!(
            text,
            "Song\nArtist: Me | Key: C\n\n(Intro riff)\n\n[Verse]\nC   G\none two\nplain words"
        );
    }

    #[test]
    fn test_key_and_chords_share_spelling() {
        let model = parse("{key: E}\n[E]la [B]lo");
        let options = FormatOptions {
            transpose: 2,
            use_flats: true,
            ..FormatOptions::default()
        };
        let text = TextFormatter::new(options).format(&model).unwrap();
        assert!(text.starts_with("Key: Gb\n"));
        assert!(text.contains("Gb Db\nla lo"));
    }
}
