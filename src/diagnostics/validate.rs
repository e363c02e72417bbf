//! Line-numbered notation checks
//!
//! Brackets never span lines, so each line is scanned on its own with one
//! open slot per bracket kind. Section markers pair across lines with a
//! stack:
//! - start marker: push
//! - end marker: remove the latest start with the same name, else report
//! - after the scan: anything left is an unclosed section

use super::{DiagnosticMark, ValidationResult};
use crate::models::LineContent;
use crate::parse::directives::{canonical_name, lookup, section_marker, SectionMarker};
use crate::parse::{is_chord, parse_line};

/// Chord-slot text that is deliberately not a chord
const NON_CHORD_MARKS: [&str; 3] = ["N.C.", "NC", "N.C"];

struct OpenSection {
    name: String,
    line: usize,
    column: usize,
}

/// Check a buffer and report errors and warnings
pub fn validate(text: &str) -> ValidationResult {
    let mut marks = Vec::new();
    let mut sections: Vec<OpenSection> = Vec::new();
    let mut has_title = false;

    for (idx, raw) in text.split('\n').enumerate() {
        let line_no = idx + 1;
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        if line.trim_start().starts_with('#') {
            continue;
        }
        let is_header = matches!(parse_line(line), LineContent::SectionHeader { .. });

        let chars: Vec<char> = line.chars().collect();
        let mut open_chord: Option<usize> = None;
        let mut open_directive: Option<usize> = None;

        for (i, &ch) in chars.iter().enumerate() {
            let column = i + 1;
            match ch {
                '[' => {
                    if let Some(prev) = open_chord.replace(i) {
                        marks.push(unclosed_chord(line_no, prev));
                    }
                }
                ']' => match open_chord.take() {
                    Some(start) => {
                        let inner: String = chars[start + 1..i].iter().collect();
                        check_chord(&inner, is_header, line_no, start + 1, &mut marks);
                    }
                    None => marks.push(DiagnosticMark::error(
                        line_no,
                        column,
                        "unmatched_chord_close",
                        "']' without a matching '['",
                    )),
                },
                '{' => {
                    if let Some(prev) = open_directive.replace(i) {
                        marks.push(unclosed_directive(line_no, prev));
                    }
                }
                '}' => match open_directive.take() {
                    Some(start) => {
                        let inner: String = chars[start + 1..i].iter().collect();
                        let span = (start + 1, i - start + 1);
                        match check_directive(&inner, line_no, span, &mut marks) {
                            Some(DirectiveSeen::Title) => has_title = true,
                            Some(DirectiveSeen::Marker(SectionMarker::Start { name, .. })) => {
                                sections.push(OpenSection {
                                    name,
                                    line: line_no,
                                    column: start + 1,
                                })
                            }
                            Some(DirectiveSeen::Marker(SectionMarker::End { name })) => {
                                match sections.iter().rposition(|s| s.name == name) {
                                    Some(pos) => {
                                        sections.remove(pos);
                                    }
                                    None => marks.push(
                                        DiagnosticMark::warning(
                                            line_no,
                                            start + 1,
                                            "unmatched_section_end",
                                            format!("end_of_{} without a matching start", name),
                                        )
                                        .with_len(span.1),
                                    ),
                                }
                            }
                            None => {}
                        }
                    }
                    None => marks.push(DiagnosticMark::error(
                        line_no,
                        column,
                        "unmatched_directive_close",
                        "'}' without a matching '{'",
                    )),
                },
                _ => {}
            }
        }

        if let Some(start) = open_chord {
            marks.push(unclosed_chord(line_no, start));
        }
        if let Some(start) = open_directive {
            marks.push(unclosed_directive(line_no, start));
        }
    }

    for open in sections {
        marks.push(DiagnosticMark::warning(
            open.line,
            open.column,
            "unclosed_section",
            format!("start_of_{} is never closed", open.name),
        ));
    }

    if !has_title && !text.trim().is_empty() {
        marks.push(DiagnosticMark::warning(
            1,
            1,
            "missing_title",
            "Song has no {title} directive",
        ));
    }

    let result = ValidationResult::from_marks(marks);
    log::debug!(
        "validated {} chars: {} errors, {} warnings",
        text.len(),
        result.errors.len(),
        result.warnings.len()
    );
    result
}

fn unclosed_chord(line: usize, start: usize) -> DiagnosticMark {
    DiagnosticMark::error(line, start + 1, "unclosed_chord", "'[' is never closed")
}

fn unclosed_directive(line: usize, start: usize) -> DiagnosticMark {
    DiagnosticMark::error(line, start + 1, "unclosed_directive", "'{' is never closed")
}

fn check_chord(
    inner: &str,
    is_header: bool,
    line: usize,
    column: usize,
    marks: &mut Vec<DiagnosticMark>,
) {
    let trimmed = inner.trim();
    let len = inner.chars().count() + 2;
    if trimmed.is_empty() {
        marks.push(
            DiagnosticMark::warning(line, column, "empty_chord", "Empty chord '[]'").with_len(len),
        );
    } else if !is_header && !NON_CHORD_MARKS.contains(&trimmed) && !is_chord(trimmed) {
        marks.push(
            DiagnosticMark::warning(
                line,
                column,
                "unknown_chord",
                format!("'{}' is not a recognized chord", trimmed),
            )
            .with_len(len),
        );
    }
}

enum DirectiveSeen {
    Title,
    Marker(SectionMarker),
}

fn check_directive(
    inner: &str,
    line: usize,
    (column, len): (usize, usize),
    marks: &mut Vec<DiagnosticMark>,
) -> Option<DirectiveSeen> {
    let name = inner.split_once(':').map_or(inner, |(name, _)| name).trim();
    if name.is_empty() {
        marks.push(
            DiagnosticMark::error(line, column, "empty_directive", "Empty directive").with_len(len),
        );
        return None;
    }

    let canonical = canonical_name(name);
    if let Some(marker) = section_marker(&canonical) {
        return Some(DirectiveSeen::Marker(marker));
    }
    if lookup(&canonical).is_none() {
        marks.push(
            DiagnosticMark::warning(
                line,
                column,
                "unknown_directive",
                format!("Unknown directive '{}'", name),
            )
            .with_len(len),
        );
        return None;
    }
    (canonical == "title").then_some(DirectiveSeen::Title)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(marks: &[DiagnosticMark]) -> Vec<&str> {
        marks.iter().map(|m| m.kind.as_str()).collect()
    }

    #[test]
    fn test_clean_song_is_valid() {
        let result = validate("{title: X}\n{soc}\n[G]la [D/F#]la\n{eoc}\n[Verse 2]\n[N.C.]hey");
        assert!(result.is_valid);
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    }

    #[test]
    fn test_unclosed_and_unmatched_brackets() {
        let result = validate("{title: X}\n[G la\nla] {key: G");
        assert!(!result.is_valid);
        assert_eq!(
            kinds(&result.errors),
            vec!["unclosed_chord", "unmatched_chord_close", "unclosed_directive"]
        );
        assert_eq!((result.errors[0].line, result.errors[0].column), (2, 1));
        assert_eq!((result.errors[1].line, result.errors[1].column), (3, 3));
        assert_eq!((result.errors[2].line, result.errors[2].column), (3, 5));
    }

    #[test]
    fn test_empty_directive_is_error() {
        let result = validate("{title: X}\n{ }");
        assert_eq!(kinds(&result.errors), vec!["empty_directive"]);
    }

    #[test]
    fn test_warnings() {
        let result = validate("[]x [H7]y\n{flavour: mint}\n{start_of_chorus}\n{end_of_verse}");
        assert!(result.is_valid);
        assert_eq!(
            kinds(&result.warnings),
            vec![
                "empty_chord",
                "missing_title",
                "unknown_chord",
                "unknown_directive",
                "unclosed_section",
                "unmatched_section_end"
            ]
        );
        let chord = &result.warnings[2];
        assert_eq!((chord.line, chord.column, chord.len), (1, 5, 4));
    }

    #[test]
    fn test_comment_lines_are_skipped() {
        let result = validate("{t: X}\n# [unclosed {");
        assert!(result.is_valid);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_empty_text_has_no_marks() {
        let result = validate("");
        assert!(result.is_valid);
        assert!(result.warnings.is_empty());
    }
}
