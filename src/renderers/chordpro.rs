//! ChordPro source formatter
//!
//! Round trip back to notation text. Untransposed output is the original
//! buffer byte for byte; with transposition only lines holding chords or the
//! key directive are regenerated.

use super::sheet::prepare;
use super::{FormatOptions, Formatter, OutputKind};
use crate::error::Result;
use crate::models::SongModel;

pub struct ChordProFormatter {
    options: FormatOptions,
}

impl ChordProFormatter {
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }
}

impl Formatter for ChordProFormatter {
    fn kind(&self) -> OutputKind {
        OutputKind::Source
    }

    fn options(&self) -> &FormatOptions {
        &self.options
    }

    fn format(&self, model: &SongModel) -> Result<String> {
        let (song, _) = prepare(model, &self.options);
        Ok(song
            .lines
            .iter()
            .map(|line| line.raw.as_str())
            .collect::<Vec<_>>()
            .join("\n"))
    }
}
