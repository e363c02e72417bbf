//! Output formatters
//!
//! A formatter turns a parsed `SongModel` into one output kind: screen HTML,
//! printable table HTML, plain text, or ChordPro source. Formatters are built
//! once per (kind, options) pair and reused through `FormatterCache`.

pub mod cache;
pub mod chordpro;
pub mod html;
pub mod print;
pub mod sheet;
pub mod text;

pub use cache::{CacheStats, FormatterCache};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use crate::error::{EngineError, Result};
use crate::models::SongModel;

/// Output representation produced by a formatter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutputKind {
    /// Screen HTML with chord/lyric columns
    Html,
    /// Standalone printable HTML with table rows
    PrintHtml,
    Text,
    /// ChordPro round trip
    Source,
}

impl OutputKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputKind::Html => "responsive",
            OutputKind::PrintHtml => "print",
            OutputKind::Text => "text",
            OutputKind::Source => "chordpro",
        }
    }
}

impl FromStr for OutputKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "responsive" | "html" => Ok(OutputKind::Html),
            "print" | "table" => Ok(OutputKind::PrintHtml),
            "text" | "plain" => Ok(OutputKind::Text),
            "chordpro" | "source" => Ok(OutputKind::Source),
            _ => {
                log::warn!("unknown output kind '{}'", s);
                Err(EngineError::UnknownOutputKind(s.to_string()))
            }
        }
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rendering options; every field has a default
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormatOptions {
    /// Append chord diagrams (screen HTML only)
    pub show_diagrams: bool,
    /// Prepended to every CSS class the HTML formatters emit
    pub css_prefix: String,
    /// Semitone offset applied to every chord and the key
    pub transpose: i32,
    /// Spell black-key chords with flats regardless of key
    pub use_flats: bool,
}

impl FormatOptions {
    /// Stable JSON with sorted keys, for cache keys
    pub fn normalized_json(&self) -> String {
        let value = serde_json::to_value(self).unwrap_or(serde_json::Value::Null);
        match value {
            serde_json::Value::Object(map) => {
                let sorted: BTreeMap<String, serde_json::Value> = map.into_iter().collect();
                serde_json::to_string(&sorted).unwrap_or_default()
            }
            other => other.to_string(),
        }
    }

    /// CSS class with the configured prefix
    pub fn class(&self, name: &str) -> String {
        format!("{}{}", self.css_prefix, name)
    }
}

/// Turns a song into one output representation
pub trait Formatter {
    fn kind(&self) -> OutputKind;

    fn options(&self) -> &FormatOptions;

    fn format(&self, model: &SongModel) -> Result<String>;
}

/// Build a formatter for `kind`
pub fn create_formatter(kind: OutputKind, options: FormatOptions) -> Result<Rc<dyn Formatter>> {
    let formatter: Rc<dyn Formatter> = match kind {
        OutputKind::Html => Rc::new(html::HtmlFormatter::new(options)),
        OutputKind::PrintHtml => Rc::new(print::PrintFormatter::new(options)?),
        OutputKind::Text => Rc::new(text::TextFormatter::new(options)),
        OutputKind::Source => Rc::new(chordpro::ChordProFormatter::new(options)),
    };
    Ok(formatter)
}

/// One-off render without a cache
pub fn format(model: &SongModel, kind: OutputKind, options: &FormatOptions) -> Result<String> {
    create_formatter(kind, options.clone())?.format(model)
}
