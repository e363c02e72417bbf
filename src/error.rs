//! Error types for the song sheet engine
//!
//! Only caller-contract violations are errors. Malformed notation is never an
//! error: the parser and transposer degrade to literal text and the validator
//! reports problems as data (see `diagnostics`).

use thiserror::Error;

/// Result alias used by every fallible engine operation
pub type Result<T> = std::result::Result<T, EngineError>;

/// Caller-contract violations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Cursor or range offset outside the buffer
    #[error("offset {offset} out of bounds (buffer length: {len})")]
    InvalidOffset { offset: i64, len: usize },

    /// Selection whose start is after its end or past the buffer
    #[error("invalid selection {start}..{end} (buffer length: {len})")]
    InvalidSelection { start: usize, end: usize, len: usize },

    /// Command name that the history manager does not know
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Output kind that no formatter produces
    #[error("unknown output kind: {0}")]
    UnknownOutputKind(String),

    /// Bracket-pair command with a character that does not open a pair
    #[error("'{0}' is not an opening bracket")]
    InvalidBracket(char),

    /// Configuration values that cannot be honoured
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Print template failed to compile or render
    #[error("template error: {0}")]
    Template(String),
}

impl From<mustache::Error> for EngineError {
    fn from(err: mustache::Error) -> Self {
        EngineError::Template(err.to_string())
    }
}
