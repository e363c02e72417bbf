//! Screen HTML formatter
//!
//! Every chorded line is a row of columns, each column a chord stacked on
//! its lyric fragment, so the browser keeps chords over their syllables
//! while wrapping. Sections carry their id for windowed rendering.

use std::fmt::Write;

use super::sheet::{build_sheet, Sheet, SheetLine, SheetSection};
use super::{FormatOptions, Formatter, OutputKind};
use crate::error::Result;
use crate::models::SongModel;
use crate::transposition::shape_for;
use crate::utils::escape_html;

pub struct HtmlFormatter {
    options: FormatOptions,
}

impl HtmlFormatter {
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    fn class(&self, name: &str) -> String {
        self.options.class(name)
    }

    fn write_header(&self, out: &mut String, sheet: &Sheet) {
        if let Some(title) = &sheet.title {
            let _ = writeln!(
                out,
                "<h1 class=\"{}\">{}</h1>",
                self.class("title"),
                escape_html(title)
            );
        }
        if let Some(subtitle) = &sheet.subtitle {
            let _ = writeln!(
                out,
                "<h2 class=\"{}\">{}</h2>",
                self.class("subtitle"),
                escape_html(subtitle)
            );
        }
        if !sheet.meta.is_empty() {
            let _ = write!(out, "<div class=\"{}\">", self.class("meta"));
            for (label, value) in &sheet.meta {
                let _ = write!(
                    out,
                    "<span class=\"{} {}\">{}: {}</span>",
                    self.class("meta-item"),
                    self.class(&format!("meta-{}", label.to_ascii_lowercase())),
                    label,
                    escape_html(value)
                );
            }
            out.push_str("</div>\n");
        }
    }

    fn write_section(&self, out: &mut String, section: &SheetSection) {
        let _ = writeln!(
            out,
            "<section class=\"{} {}\" data-section-id=\"{}\">",
            self.class("section"),
            self.class(&format!("section-{}", section.kind.as_str())),
            section.id
        );
        if let Some(label) = &section.label {
            let _ = writeln!(
                out,
                "<h3 class=\"{}\">{}</h3>",
                self.class("section-label"),
                escape_html(label)
            );
        }
        for line in &section.lines {
            match line {
                SheetLine::Chords(cells) => {
                    let _ = write!(out, "<div class=\"{}\">", self.class("row"));
                    for cell in cells {
                        let chord = cell.chord.as_deref().map(escape_html).unwrap_or_default();
                        let lyric = if cell.lyric.is_empty() {
                            "&nbsp;".to_string()
                        } else {
                            escape_html(&cell.lyric)
                        };
                        let _ = write!(
                            out,
                            "<div class=\"{}\"><div class=\"{}\">{}</div><div class=\"{}\">{}</div></div>",
                            self.class("column"),
                            self.class("chord"),
                            chord,
                            self.class("lyrics"),
                            lyric
                        );
                    }
                    out.push_str("</div>\n");
                }
                SheetLine::Lyrics(text) => {
                    let _ = writeln!(
                        out,
                        "<div class=\"{}\"><div class=\"{}\">{}</div></div>",
                        self.class("row"),
                        self.class("lyrics"),
                        escape_html(text)
                    );
                }
                SheetLine::Comment { text, style } => {
                    let _ = writeln!(
                        out,
                        "<div class=\"{} {}\">{}</div>",
                        self.class("comment"),
                        self.class(&format!("comment-{}", style.as_str())),
                        escape_html(text)
                    );
                }
                SheetLine::Blank => {
                    let _ = writeln!(out, "<div class=\"{}\"></div>", self.class("empty-line"));
                }
            }
        }
        out.push_str("</section>\n");
    }

    fn write_diagrams(&self, out: &mut String, sheet: &Sheet) {
        if sheet.chords.is_empty() {
            return;
        }
        let _ = writeln!(out, "<div class=\"{}\">", self.class("diagrams"));
        for chord in &sheet.chords {
            let name = chord.to_string_with(sheet.spelling);
            let _ = write!(
                out,
                "<div class=\"{}\" data-chord=\"{}\"><span class=\"{}\">{}</span>",
                self.class("chord-diagram"),
                escape_html(&name),
                self.class("chord-diagram-name"),
                escape_html(&name)
            );
            if let Some(shape) = shape_for(chord) {
                let _ = write!(
                    out,
                    "<span class=\"{}\">{}</span>",
                    self.class("chord-diagram-frets"),
                    shape.frets
                );
            }
            out.push_str("</div>\n");
        }
        out.push_str("</div>\n");
    }
}

impl Formatter for HtmlFormatter {
    fn kind(&self) -> OutputKind {
        OutputKind::Html
    }

    fn options(&self) -> &FormatOptions {
        &self.options
    }

    fn format(&self, model: &SongModel) -> Result<String> {
        let sheet = build_sheet(model, &self.options);
        let mut out = String::with_capacity(model.lines.len() * 96);
        let _ = writeln!(out, "<div class=\"{}\">", self.class("song"));
        self.write_header(&mut out, &sheet);
        for section in &sheet.sections {
            self.write_section(&mut out, section);
        }
        if self.options.show_diagrams {
            self.write_diagrams(&mut out, &sheet);
        }
        out.push_str("</div>\n");
        Ok(out)
    }
}
