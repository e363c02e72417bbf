//! Undo/redo history for the editing surface
//!
//! History stores whole-buffer snapshots (`EditorContext`) rather than
//! inverse operations, so any command can be undone without knowing how to
//! reverse it. Keystroke-level edits are coalesced: a snapshot is only taken
//! when the edit kind changes or enough time and text have accumulated since
//! the previous snapshot. Structural commands always snapshot.
//!
//! WASM has no `SystemTime`; callers that care about coalescing pass the
//! timestamp explicitly through `execute_at`.

pub mod commands;

pub use commands::{CommandKind, EditCommand, TypingKind};

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::config::HistoryConfig;
use crate::error::Result;
use crate::models::{EditorContext, TextSelection};

/// Outcome of executing a command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResult {
    pub success: bool,
    pub new_text: Option<String>,
    pub new_selection: Option<TextSelection>,
}

impl CommandResult {
    fn applied(ctx: EditorContext) -> Self {
        Self {
            success: true,
            new_text: Some(ctx.text),
            new_selection: Some(ctx.selection),
        }
    }

    fn nothing_to_do() -> Self {
        Self {
            success: false,
            new_text: None,
            new_selection: None,
        }
    }
}

/// Snapshot counts reported to the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryState {
    pub can_undo: bool,
    pub can_redo: bool,
    pub undo_count: usize,
    pub redo_count: usize,
}

/// Tracks the last keystroke-level snapshot for coalescing
#[derive(Debug, Clone)]
struct Coalescing {
    kind: TypingKind,
    /// Buffer text captured by the last snapshot
    text: String,
    /// Length of that text in chars
    len: usize,
    at_ms: u64,
}

/// Snapshot-based undo/redo stacks with keystroke coalescing
#[derive(Debug, Clone)]
pub struct HistoryManager {
    undo_stack: VecDeque<EditorContext>,
    redo_stack: VecDeque<EditorContext>,
    config: HistoryConfig,
    indent_unit: String,
    coalescing: Option<Coalescing>,
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new(HistoryConfig::default(), "  ")
    }
}

impl HistoryManager {
    pub fn new(config: HistoryConfig, indent_unit: impl Into<String>) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            config,
            indent_unit: indent_unit.into(),
            coalescing: None,
        }
    }

    /// Execute a command using the current wall-clock time
    pub fn execute(&mut self, command: &EditCommand, ctx: &EditorContext) -> Result<CommandResult> {
        self.execute_at(command, ctx, crate::utils::now_ms())
    }

    /// Execute a command, recording history as of `now_ms`
    pub fn execute_at(
        &mut self,
        command: &EditCommand,
        ctx: &EditorContext,
        now_ms: u64,
    ) -> Result<CommandResult> {
        ctx.validate()?;

        let kind = command.kind();
        if kind == CommandKind::History {
            return match command {
                EditCommand::Redo => self.redo(ctx),
                _ => self.undo(ctx),
            };
        }

        let next = command.apply(ctx, &self.indent_unit)?;
        if next.text == ctx.text {
            // Selection-only change; nothing worth remembering
            return Ok(CommandResult::applied(next));
        }

        match kind {
            CommandKind::Typing(typing) => {
                if self.should_snapshot(typing, ctx, now_ms) {
                    self.push_undo(ctx.clone());
                    self.coalescing = Some(Coalescing {
                        kind: typing,
                        len: ctx.char_len(),
                        text: ctx.text.clone(),
                        at_ms: now_ms,
                    });
                } else if let Some(state) = self.coalescing.as_mut() {
                    state.kind = typing;
                }
            }
            _ => {
                self.push_undo(ctx.clone());
                self.coalescing = None;
            }
        }
        self.redo_stack.clear();

        log::debug!(
            "{} applied (undo depth {}, text {} -> {} chars)",
            command.name(),
            self.undo_stack.len(),
            ctx.char_len(),
            next.char_len()
        );
        Ok(CommandResult::applied(next))
    }

    /// Decide whether a keystroke-level edit starts a new undo step
    fn should_snapshot(&self, kind: TypingKind, before: &EditorContext, now_ms: u64) -> bool {
        let Some(last) = &self.coalescing else {
            return true;
        };
        if before.text == last.text {
            return false;
        }
        if kind != last.kind {
            return true;
        }

        let elapsed = now_ms.saturating_sub(last.at_ms);
        let delta = before.char_len().abs_diff(last.len);
        elapsed >= self.config.debounce_ms && delta > self.config.min_char_delta
    }

    fn push_undo(&mut self, ctx: EditorContext) {
        self.undo_stack.push_back(ctx);
        if self.undo_stack.len() > self.config.max_depth {
            self.undo_stack.pop_front();
        }
    }

    fn push_redo(&mut self, ctx: EditorContext) {
        self.redo_stack.push_back(ctx);
        if self.redo_stack.len() > self.config.max_depth {
            self.redo_stack.pop_front();
        }
    }

    /// Restore the most recent snapshot; `current` moves to the redo stack
    pub fn undo(&mut self, current: &EditorContext) -> Result<CommandResult> {
        current.validate()?;
        let Some(previous) = self.undo_stack.pop_back() else {
            return Ok(CommandResult::nothing_to_do());
        };
        self.push_redo(current.clone());
        self.coalescing = None;
        Ok(CommandResult::applied(previous))
    }

    /// Re-apply the most recently undone snapshot
    pub fn redo(&mut self, current: &EditorContext) -> Result<CommandResult> {
        current.validate()?;
        let Some(next) = self.redo_stack.pop_back() else {
            return Ok(CommandResult::nothing_to_do());
        };
        self.push_undo(current.clone());
        self.coalescing = None;
        Ok(CommandResult::applied(next))
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn state(&self) -> HistoryState {
        HistoryState {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
            undo_count: self.undo_count(),
            redo_count: self.redo_count(),
        }
    }

    /// Drop all history (e.g. when a different song is loaded)
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.coalescing = None;
    }
}
