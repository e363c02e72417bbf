//! Diagnostics for song notation
//!
//! The parser never rejects input. Problems a human should look at
//! (unbalanced brackets, unknown directives, chords outside the grammar) are
//! reported here as data, with 1-based line and column numbers for the
//! editor gutter.

pub mod validate;

pub use validate::validate;

use serde::{Deserialize, Serialize};

/// Severity level for diagnostic marks
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

/// A diagnostic mark highlighting an issue at a specific location
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticMark {
    /// 1-based line number
    pub line: usize,
    /// 1-based column (chars)
    pub column: usize,
    /// Length of the highlight in chars
    pub len: usize,
    pub severity: DiagnosticSeverity,
    /// Kind identifier (e.g. "unclosed_chord", "unknown_directive")
    pub kind: String,
    /// Human-readable message
    pub message: String,
}

impl DiagnosticMark {
    pub fn new(
        line: usize,
        column: usize,
        severity: DiagnosticSeverity,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            line,
            column,
            len: 1,
            severity,
            kind: kind.into(),
            message: message.into(),
        }
    }

    pub fn error(line: usize, column: usize, kind: &str, message: impl Into<String>) -> Self {
        Self::new(line, column, DiagnosticSeverity::Error, kind, message)
    }

    pub fn warning(line: usize, column: usize, kind: &str, message: impl Into<String>) -> Self {
        Self::new(line, column, DiagnosticSeverity::Warning, kind, message)
    }

    /// Create with custom length (for range highlights)
    pub fn with_len(mut self, len: usize) -> Self {
        self.len = len.max(1);
        self
    }
}

/// Outcome of `validate`
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// True when there are no errors; warnings do not count
    pub is_valid: bool,
    pub errors: Vec<DiagnosticMark>,
    pub warnings: Vec<DiagnosticMark>,
}

impl ValidationResult {
    /// Split marks by severity, each list ordered by position
    pub fn from_marks(marks: impl IntoIterator<Item = DiagnosticMark>) -> Self {
        let (mut errors, mut warnings): (Vec<_>, Vec<_>) = marks
            .into_iter()
            .partition(|m| m.severity == DiagnosticSeverity::Error);
        errors.sort_by_key(|m| (m.line, m.column));
        warnings.sort_by_key(|m| (m.line, m.column));
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_mark_creation() {
        let mark = DiagnosticMark::error(1, 5, "unclosed_chord", "Unclosed chord").with_len(3);
        assert_eq!(mark.line, 1);
        assert_eq!(mark.column, 5);
        assert_eq!(mark.len, 3);
        assert_eq!(mark.severity, DiagnosticSeverity::Error);
        assert_eq!(mark.kind, "unclosed_chord");
    }

    #[test]
    fn test_from_marks_partitions_and_sorts() {
        let result = ValidationResult::from_marks(vec![
            DiagnosticMark::warning(3, 1, "w", "later"),
            DiagnosticMark::warning(1, 4, "w", "earlier"),
        ]);
        assert!(result.is_valid);
        assert!(result.has_warnings());
        assert_eq!(result.warnings[0].message, "earlier");

        let result = ValidationResult::from_marks(vec![DiagnosticMark::error(2, 1, "e", "bad")]);
        assert!(!result.is_valid);
    }
}
