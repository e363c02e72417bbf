//! Directive catalog
//!
//! Single table of known `{name: value}` directives, shared by the parser
//! (alias resolution, metadata extraction), the validator (unknown-name
//! warnings) and autocomplete (suggestions grouped by category).

use serde::{Deserialize, Serialize};

use crate::models::SectionKind;

/// Display grouping for directive suggestions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectiveCategory {
    Metadata,
    Section,
    Formatting,
    Control,
}

/// One catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectiveSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub category: DirectiveCategory,
    pub takes_value: bool,
    pub description: &'static str,
}

const fn spec(
    name: &'static str,
    aliases: &'static [&'static str],
    category: DirectiveCategory,
    takes_value: bool,
    description: &'static str,
) -> DirectiveSpec {
    DirectiveSpec {
        name,
        aliases,
        category,
        takes_value,
        description,
    }
}

use DirectiveCategory::{Control, Formatting, Metadata, Section};

pub static DIRECTIVES: &[DirectiveSpec] = &[
    // Metadata
    spec("title", &["t"], Metadata, true, "Song title"),
    spec("subtitle", &["st"], Metadata, true, "Subtitle"),
    spec("artist", &[], Metadata, true, "Performing artist"),
    spec("composer", &[], Metadata, true, "Composer"),
    spec("lyricist", &[], Metadata, true, "Lyricist"),
    spec("album", &[], Metadata, true, "Album"),
    spec("year", &[], Metadata, true, "Release year"),
    spec("key", &[], Metadata, true, "Musical key"),
    spec("tempo", &[], Metadata, true, "Tempo in BPM"),
    spec("time", &[], Metadata, true, "Time signature"),
    spec("capo", &[], Metadata, true, "Capo fret"),
    spec("duration", &[], Metadata, true, "Song length"),
    spec("copyright", &[], Metadata, true, "Copyright notice"),
    // Sections
    spec("start_of_verse", &["sov"], Section, false, "Begin verse"),
    spec("end_of_verse", &["eov"], Section, false, "End verse"),
    spec("start_of_chorus", &["soc"], Section, false, "Begin chorus"),
    spec("end_of_chorus", &["eoc"], Section, false, "End chorus"),
    spec("start_of_bridge", &["sob"], Section, false, "Begin bridge"),
    spec("end_of_bridge", &["eob"], Section, false, "End bridge"),
    spec("start_of_tab", &["sot"], Section, false, "Begin tablature"),
    spec("end_of_tab", &["eot"], Section, false, "End tablature"),
    spec("chorus", &[], Section, false, "Repeat the chorus"),
    // Formatting
    spec("comment", &["c"], Formatting, true, "Comment line"),
    spec("comment_italic", &["ci"], Formatting, true, "Italic comment"),
    spec("comment_box", &["cb"], Formatting, true, "Boxed comment"),
    spec("highlight", &[], Formatting, true, "Highlighted text"),
    // Control
    spec("new_page", &["np"], Control, false, "Page break"),
    spec("column_break", &["colb"], Control, false, "Column break"),
    spec("columns", &["col"], Control, true, "Number of columns"),
    spec("new_song", &["ns"], Control, false, "Start a new song"),
];

/// Look up a directive by canonical name or alias, case-insensitively
pub fn lookup(name: &str) -> Option<&'static DirectiveSpec> {
    let lower = name.trim().to_ascii_lowercase();
    DIRECTIVES
        .iter()
        .find(|d| d.name == lower || d.aliases.contains(&lower.as_str()))
}

/// Canonical lowercase name; unknown names are lowercased as-is
pub fn canonical_name(name: &str) -> String {
    match lookup(name) {
        Some(spec) => spec.name.to_string(),
        None => name.trim().to_ascii_lowercase(),
    }
}

pub fn is_metadata(canonical: &str) -> bool {
    lookup(canonical).is_some_and(|d| d.category == Metadata)
}

pub fn is_comment(canonical: &str) -> bool {
    matches!(canonical, "comment" | "comment_italic" | "comment_box" | "highlight")
}

/// Section boundary carried by a directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionMarker {
    Start { kind: SectionKind, name: String },
    End { name: String },
}

/// Interpret `start_of_*` / `end_of_*` (any suffix) as a section marker
///
/// `name` is the suffix after `start_of_`/`end_of_` and pairs starts with ends.
pub fn section_marker(canonical: &str) -> Option<SectionMarker> {
    if let Some(name) = canonical.strip_prefix("start_of_") {
        if name.is_empty() {
            return None;
        }
        let kind = SectionKind::from_word(name).unwrap_or(SectionKind::Custom);
        return Some(SectionMarker::Start {
            kind,
            name: name.to_string(),
        });
    }
    canonical
        .strip_prefix("end_of_")
        .filter(|name| !name.is_empty())
        .map(|name| SectionMarker::End {
            name: name.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_resolution() {
        assert_eq!(canonical_name("t"), "title");
        assert_eq!(canonical_name(" SOC "), "start_of_chorus");
        assert_eq!(canonical_name("Title"), "title");
        assert_eq!(canonical_name("x_custom"), "x_custom");
    }

    #[test]
    fn test_section_markers() {
        assert_eq!(
            section_marker("start_of_verse"),
            Some(SectionMarker::Start {
                kind: SectionKind::Verse,
                name: "verse".to_string()
            })
        );
        assert_eq!(
            section_marker("start_of_tab"),
            Some(SectionMarker::Start {
                kind: SectionKind::Custom,
                name: "tab".to_string()
            })
        );
        assert_eq!(
            section_marker("end_of_chorus"),
            Some(SectionMarker::End {
                name: "chorus".to_string()
            })
        );
        assert_eq!(section_marker("title"), None);
        assert_eq!(section_marker("start_of_"), None);
    }

    #[test]
    fn test_metadata_category() {
        assert!(is_metadata("key"));
        assert!(!is_metadata("comment"));
        assert!(!is_metadata("unknown"));
    }
}
