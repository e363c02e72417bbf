//! Section segmentation
//!
//! Groups model lines into sections. A section starts at a start marker
//! (`{start_of_verse}`, `{soc: Chorus 2}`, `[Bridge]`) and runs to the next
//! start marker or end of input; end markers stay inside the section they
//! close. Lines before the first marker form a synthetic preamble, and a song
//! without markers is one synthetic section.

use super::directives::{section_marker, SectionMarker};
use super::grammar::parse_line;
use crate::models::{LineContent, NotationLine, Section, SectionKind, SongModel};

/// Start marker found on a line: kind and display label
fn start_marker(content: &LineContent) -> Option<(SectionKind, String)> {
    match content {
        LineContent::Directive(directive) => match section_marker(&directive.canonical)? {
            SectionMarker::Start { kind, name } => {
                let label = match directive.value.as_deref().map(str::trim) {
                    Some(value) if !value.is_empty() => value.to_string(),
                    _ if kind == SectionKind::Custom => title_case(&name),
                    _ => kind.default_label().to_string(),
                };
                Some((kind, label))
            }
            SectionMarker::End { .. } => None,
        },
        LineContent::SectionHeader { label } => {
            let word = label
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .trim_end_matches(|c: char| c == ':' || c.is_ascii_digit());
            let kind = SectionKind::from_word(word).unwrap_or(SectionKind::Custom);
            Some((kind, label.clone()))
        }
        _ => None,
    }
}

fn title_case(name: &str) -> String {
    name.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn join_raw(lines: &[NotationLine]) -> String {
    lines
        .iter()
        .map(|l| l.raw.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Derive the ordered section list from a parsed song
pub fn segment(model: &SongModel) -> Vec<Section> {
    if model.lines.is_empty() {
        return Vec::new();
    }

    let starts: Vec<(usize, SectionKind, String)> = model
        .lines
        .iter()
        .enumerate()
        .filter_map(|(i, line)| start_marker(&line.content).map(|(kind, label)| (i, kind, label)))
        .collect();

    let mut sections = Vec::with_capacity(starts.len() + 1);
    let mut push = |kind: SectionKind, label: String, start: usize, end: usize, synthetic: bool| {
        let id = format!("section-{}", sections.len());
        sections.push(Section {
            id,
            kind,
            label,
            content: join_raw(&model.lines[start..end]),
            start_line: start,
            end_line: end,
            synthetic,
        });
    };

    match starts.first() {
        None => push(SectionKind::Custom, String::new(), 0, model.lines.len(), true),
        Some(&(first, _, _)) => {
            if first > 0 {
                push(SectionKind::Custom, String::new(), 0, first, true);
            }
            for (n, (start, kind, label)) in starts.iter().enumerate() {
                let end = starts
                    .get(n + 1)
                    .map(|(next, _, _)| *next)
                    .unwrap_or(model.lines.len());
                push(*kind, label.clone(), *start, end, false);
            }
        }
    }

    log::debug!("segmented {} lines into {} sections", model.lines.len(), sections.len());
    sections
}

/// Start-marker directive emitted for a section whose content has none
fn marker_for(section: &Section) -> String {
    let label = section.label.trim();
    let name = match section.kind {
        SectionKind::Custom => "custom",
        kind => kind.as_str(),
    };
    if label.is_empty() || label == section.kind.default_label() {
        format!("{{start_of_{}}}", name)
    } else {
        format!("{{start_of_{}: {}}}", name, label)
    }
}

fn begins_with_start_marker(content: &str) -> bool {
    content
        .split('\n')
        .map(|l| parse_line(l.strip_suffix('\r').unwrap_or(l)))
        .find(|c| *c != LineContent::Blank)
        .is_some_and(|c| start_marker(&c).is_some())
}

/// Reassemble sections into song text
///
/// Inverse of `segment`. Non-synthetic sections whose content lacks a start
/// marker (e.g. built or reordered by the caller) get one emitted in front.
pub fn sections_to_text(sections: &[Section]) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(sections.len());
    for section in sections {
        if !section.synthetic && !begins_with_start_marker(&section.content) {
            parts.push(marker_for(section));
        }
        parts.push(section.content.clone());
    }
    parts.join("\n")
}
