//! Buffer-editing commands
//!
//! Each command maps an `EditorContext` to a new one. Commands never touch
//! history themselves; `HistoryManager` decides what gets snapshotted.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::models::{EditorContext, TextSelection};
use crate::text::{edit_lines, replace_range};

/// A named, parameterized editing operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EditCommand {
    /// Replace the selection (or insert at the caret) with text
    InsertText { text: String },
    /// Delete chars `[start, end)`
    DeleteRange { start: usize, end: usize },
    /// Insert `[]`/`{}` with the caret inside, or wrap the selection
    InsertBracketPair { open: char },
    /// Add or remove `#` on every line touched by the selection
    ToggleComment,
    Indent,
    Outdent,
    Undo,
    Redo,
}

/// How the history manager records a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// Keystroke-level edit, coalesced with its neighbours
    Typing(TypingKind),
    /// Always snapshotted immediately
    Structural,
    /// Undo/redo navigation
    History,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingKind {
    Insert,
    Delete,
}

impl EditCommand {
    pub fn name(&self) -> &'static str {
        match self {
            EditCommand::InsertText { .. } => "insertText",
            EditCommand::DeleteRange { .. } => "deleteRange",
            EditCommand::InsertBracketPair { .. } => "insertBracketPair",
            EditCommand::ToggleComment => "toggleComment",
            EditCommand::Indent => "indent",
            EditCommand::Outdent => "outdent",
            EditCommand::Undo => "undo",
            EditCommand::Redo => "redo",
        }
    }

    /// Parameterless command by name
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "toggleComment" => Ok(EditCommand::ToggleComment),
            "indent" => Ok(EditCommand::Indent),
            "outdent" => Ok(EditCommand::Outdent),
            "undo" => Ok(EditCommand::Undo),
            "redo" => Ok(EditCommand::Redo),
            other => {
                log::warn!("unknown parameterless command '{}'", other);
                Err(EngineError::UnknownCommand(other.to_string()))
            }
        }
    }

    /// Decode a command object such as `{"type": "insertText", "text": "a"}`
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| EngineError::UnknownCommand(e.to_string()))
    }

    pub fn kind(&self) -> CommandKind {
        match self {
            EditCommand::InsertText { .. } => CommandKind::Typing(TypingKind::Insert),
            EditCommand::DeleteRange { .. } => CommandKind::Typing(TypingKind::Delete),
            EditCommand::InsertBracketPair { .. }
            | EditCommand::ToggleComment
            | EditCommand::Indent
            | EditCommand::Outdent => CommandKind::Structural,
            EditCommand::Undo | EditCommand::Redo => CommandKind::History,
        }
    }

    /// Apply to a context, producing the post-command context
    ///
    /// Undo and redo are not buffer edits and return the context unchanged.
    pub fn apply(&self, ctx: &EditorContext, indent_unit: &str) -> Result<EditorContext> {
        let sel = ctx.selection;
        match self {
            EditCommand::InsertText { text } => {
                let new_text = replace_range(&ctx.text, sel.start, sel.end, text)?;
                let caret = sel.start + text.chars().count();
                Ok(EditorContext::with_cursor(new_text, caret))
            }
            EditCommand::DeleteRange { start, end } => {
                let new_text = replace_range(&ctx.text, *start, *end, "")?;
                Ok(EditorContext::with_cursor(new_text, *start))
            }
            EditCommand::InsertBracketPair { open } => {
                let close = closing_bracket(*open)?;
                let inner = crate::text::slice(&ctx.text, sel.start, sel.end)?;
                let wrapped = format!("{}{}{}", open, inner, close);
                let new_text = replace_range(&ctx.text, sel.start, sel.end, &wrapped)?;
                Ok(EditorContext::new(
                    new_text,
                    TextSelection::new(sel.start + 1, sel.end + 1),
                ))
            }
            EditCommand::ToggleComment => {
                let edit = edit_lines(&ctx.text, sel, toggle_comment_lines)?;
                Ok(EditorContext::new(edit.text, edit.selection))
            }
            EditCommand::Indent => {
                let edit = edit_lines(&ctx.text, sel, |lines| indent_lines(lines, indent_unit))?;
                Ok(EditorContext::new(edit.text, edit.selection))
            }
            EditCommand::Outdent => {
                let edit = edit_lines(&ctx.text, sel, |lines| outdent_lines(lines, indent_unit))?;
                Ok(EditorContext::new(edit.text, edit.selection))
            }
            EditCommand::Undo | EditCommand::Redo => Ok(ctx.clone()),
        }
    }
}

fn closing_bracket(open: char) -> Result<char> {
    match open {
        '[' => Ok(']'),
        '{' => Ok('}'),
        other => Err(EngineError::InvalidBracket(other)),
    }
}

fn is_commented(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

/// Comment every non-blank line, or uncomment if they already all are
fn toggle_comment_lines(lines: &[&str]) -> Vec<String> {
    let all_blank = lines.iter().all(|l| l.trim().is_empty());
    let uncomment = !all_blank
        && lines
            .iter()
            .filter(|l| !l.trim().is_empty())
            .all(|l| is_commented(l));

    lines
        .iter()
        .map(|line| {
            if uncomment {
                let indent_len = line.len() - line.trim_start().len();
                let (indent, rest) = line.split_at(indent_len);
                let rest = rest.strip_prefix('#').unwrap_or(rest);
                let rest = rest.strip_prefix(' ').unwrap_or(rest);
                format!("{}{}", indent, rest)
            } else if all_blank || !line.trim().is_empty() {
                format!("# {}", line)
            } else {
                line.to_string()
            }
        })
        .collect()
}

fn indent_lines(lines: &[&str], unit: &str) -> Vec<String> {
    let single = lines.len() == 1;
    lines
        .iter()
        .map(|line| {
            if single || !line.is_empty() {
                format!("{}{}", unit, line)
            } else {
                line.to_string()
            }
        })
        .collect()
}

fn outdent_lines(lines: &[&str], unit: &str) -> Vec<String> {
    let width = unit.chars().count();
    lines
        .iter()
        .map(|line| {
            if let Some(rest) = line.strip_prefix(unit) {
                return rest.to_string();
            }
            if let Some(rest) = line.strip_prefix('\t') {
                return rest.to_string();
            }
            let spaces = line.chars().take(width).take_while(|c| *c == ' ').count();
            line[spaces..].to_string()
        })
        .collect()
}
