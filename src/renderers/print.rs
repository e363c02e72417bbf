//! Printable HTML formatter
//!
//! Produces a standalone page from a Mustache template. Chorded lines are
//! two-row tables (chords over lyrics) so print layout never reflows chords
//! away from their syllables. The template is compiled once per formatter.

use serde::Serialize;

use super::sheet::{build_sheet, Sheet, SheetLine};
use super::{FormatOptions, Formatter, OutputKind};
use crate::error::Result;
use crate::models::SongModel;

const PRINT_TEMPLATE: &str = include_str!("templates/print.html.mustache");

#[derive(Debug, Serialize)]
struct PrintContext {
    prefix: String,
    title: String,
    has_title: bool,
    subtitle: String,
    has_subtitle: bool,
    meta: Vec<MetaItem>,
    has_meta: bool,
    sections: Vec<PrintSection>,
}

#[derive(Debug, Serialize)]
struct MetaItem {
    label: String,
    value: String,
}

#[derive(Debug, Serialize)]
struct PrintSection {
    kind: String,
    label: String,
    has_label: bool,
    lines: Vec<PrintLine>,
}

/// One displayed line; exactly one `is_*` flag is set
#[derive(Debug, Default, Serialize)]
struct PrintLine {
    is_chords: bool,
    is_lyrics: bool,
    is_comment: bool,
    is_blank: bool,
    cells: Vec<PrintCell>,
    text: String,
    style: String,
}

#[derive(Debug, Serialize)]
struct PrintCell {
    chord: String,
    lyric: String,
}

impl PrintContext {
    fn from_sheet(sheet: Sheet, prefix: &str) -> Self {
        let sections = sheet
            .sections
            .into_iter()
            .map(|section| PrintSection {
                kind: section.kind.as_str().to_string(),
                has_label: section.label.is_some(),
                label: section.label.unwrap_or_default(),
                lines: section.lines.into_iter().map(print_line).collect(),
            })
            .collect();

        Self {
            prefix: prefix.to_string(),
            has_title: sheet.title.is_some(),
            title: sheet.title.unwrap_or_default(),
            has_subtitle: sheet.subtitle.is_some(),
            subtitle: sheet.subtitle.unwrap_or_default(),
            has_meta: !sheet.meta.is_empty(),
            meta: sheet
                .meta
                .into_iter()
                .map(|(label, value)| MetaItem {
                    label: label.to_string(),
                    value,
                })
                .collect(),
            sections,
        }
    }
}

fn print_line(line: SheetLine) -> PrintLine {
    match line {
        SheetLine::Chords(cells) => PrintLine {
            is_chords: true,
            cells: cells
                .into_iter()
                .map(|c| PrintCell {
                    chord: c.chord.unwrap_or_default(),
                    lyric: c.lyric,
                })
                .collect(),
            ..PrintLine::default()
        },
        SheetLine::Lyrics(text) => PrintLine {
            is_lyrics: true,
            text,
            ..PrintLine::default()
        },
        SheetLine::Comment { text, style } => PrintLine {
            is_comment: true,
            text,
            style: style.as_str().to_string(),
            ..PrintLine::default()
        },
        SheetLine::Blank => PrintLine {
            is_blank: true,
            ..PrintLine::default()
        },
    }
}

pub struct PrintFormatter {
    options: FormatOptions,
    template: mustache::Template,
}

impl PrintFormatter {
    pub fn new(options: FormatOptions) -> Result<Self> {
        let template = mustache::compile_str(PRINT_TEMPLATE)?;
        Ok(Self { options, template })
    }
}

impl Formatter for PrintFormatter {
    fn kind(&self) -> OutputKind {
        OutputKind::PrintHtml
    }

    fn options(&self) -> &FormatOptions {
        &self.options
    }

    fn format(&self, model: &SongModel) -> Result<String> {
        let sheet = build_sheet(model, &self.options);
        let context = PrintContext::from_sheet(sheet, &self.options.css_prefix);
        Ok(self.template.render_to_string(&context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;

    #[test]
    fn test_print_page() {
        let model = parse("{title: Tom & Jerry}\n{key: D}\n{sov}\n[D]Hello [A7]there\n{c: slowly}");
        let html = PrintFormatter::new(FormatOptions::default())
            .unwrap()
            .format(&model)
            .unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<h1 class=\"title\">Tom &amp; Jerry</h1>"));
        assert!(html.contains("<td><b>Key:</b> D</td>"));
        assert!(html.contains("<div class=\"section section-verse\">"));
        assert!(html.contains("<h2 class=\"section-label\">Verse</h2>"));
        assert!(html.contains("<tr class=\"chords\"><td>D</td><td>A7</td></tr>"));
        assert!(html.contains("<tr class=\"lyrics\"><td>Hello </td><td>there</td></tr>"));
        assert!(html.contains("<div class=\"comment comment-plain\">slowly</div>"));
        assert!(!html.contains("class=\"subtitle\""));
    }

    #[test]
    fn test_print_prefix_and_transpose() {
        let model = parse("[C]x");
        let options = FormatOptions {
            css_prefix: "p-".to_string(),
            transpose: 1,
            use_flats: true,
            ..FormatOptions::default()
        };
        let html = PrintFormatter::new(options).unwrap().format(&model).unwrap();
        assert!(html.contains("<body class=\"p-print\">"));
        assert!(html.contains("<td>Db</td>"));
    }
}
