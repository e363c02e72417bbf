//! Editing session
//!
//! One `EditorSession` per open document. It owns the per-document state:
//! undo/redo history, formatter cache, autocomplete state and the most
//! recent parse. Nothing here is shared between sessions.

use std::rc::Rc;

use crate::autocomplete::{AutocompleteState, AutocompleteView};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::models::{EditorContext, Section, SongModel, TextSelection};
use crate::parse::{parse, segment};
use crate::renderers::{CacheStats, FormatOptions, FormatterCache, OutputKind};
use crate::undo::{CommandResult, EditCommand, HistoryManager, HistoryState};
use crate::utils::{TimingSummary, Timings};

pub struct EditorSession {
    config: EngineConfig,
    history: HistoryManager,
    formatters: FormatterCache,
    autocomplete: AutocompleteState,
    /// Last parsed buffer and its model
    last_parse: Option<(String, Rc<SongModel>)>,
    timings: Timings,
}

impl EditorSession {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            history: HistoryManager::new(config.history.clone(), config.indent_unit.clone()),
            formatters: FormatterCache::new(config.cache_capacity),
            autocomplete: AutocompleteState::new(config.autocomplete.max_suggestions),
            last_parse: None,
            timings: Timings::new(),
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Parse `text`, reusing the previous model when the buffer is unchanged
    pub fn parse(&mut self, text: &str) -> Rc<SongModel> {
        if let Some((last_text, model)) = &self.last_parse {
            if last_text == text {
                return Rc::clone(model);
            }
        }
        let model = Rc::new(self.timings.measure("parse", || parse(text)));
        self.last_parse = Some((text.to_string(), Rc::clone(&model)));
        model
    }

    pub fn sections(&mut self, text: &str) -> Vec<Section> {
        let model = self.parse(text);
        segment(&model)
    }

    /// Render the buffer through the session's formatter cache
    pub fn format(
        &mut self,
        text: &str,
        kind: OutputKind,
        options: &FormatOptions,
    ) -> Result<String> {
        let model = self.parse(text);
        let formatter = self.formatters.get_formatter(kind, options)?;
        let start = crate::utils::precise_ms();
        let out = formatter.format(&model);
        self.timings
            .record(&format!("format:{}", kind), crate::utils::precise_ms() - start);
        out
    }

    pub fn execute(&mut self, command: &EditCommand, ctx: &EditorContext) -> Result<CommandResult> {
        self.history.execute(command, ctx)
    }

    pub fn execute_at(
        &mut self,
        command: &EditCommand,
        ctx: &EditorContext,
        now_ms: u64,
    ) -> Result<CommandResult> {
        self.history.execute_at(command, ctx, now_ms)
    }

    pub fn undo(&mut self, ctx: &EditorContext) -> Result<CommandResult> {
        self.history.undo(ctx)
    }

    pub fn redo(&mut self, ctx: &EditorContext) -> Result<CommandResult> {
        self.history.redo(ctx)
    }

    pub fn history_state(&self) -> HistoryState {
        self.history.state()
    }

    /// Start over with a different document
    pub fn load(&mut self, text: &str) -> Rc<SongModel> {
        self.history.clear();
        self.formatters.clear();
        self.autocomplete = AutocompleteState::new(self.config.autocomplete.max_suggestions);
        self.last_parse = None;
        self.parse(text)
    }

    /// Re-detect autocomplete at the cursor
    ///
    /// Chord suggestions come from the last parsed model, which may lag the
    /// buffer by one debounce interval.
    pub fn update_autocomplete(
        &mut self,
        text: &str,
        cursor: usize,
    ) -> Result<Option<AutocompleteView>> {
        let model = self.last_parse.as_ref().map(|(_, model)| Rc::clone(model));
        self.autocomplete.update(text, cursor, model.as_deref())
    }

    pub fn move_autocomplete_selection(&mut self, delta: i32) -> Option<usize> {
        self.autocomplete.move_selection(delta)
    }

    pub fn dismiss_autocomplete(&mut self) {
        self.autocomplete.dismiss();
    }

    /// Apply the highlighted suggestion as an undoable insert
    ///
    /// Returns `None` when no suggestion list is showing.
    pub fn accept_autocomplete(&mut self, ctx: &EditorContext) -> Result<Option<CommandResult>> {
        let Some(completion) = self.autocomplete.accept() else {
            return Ok(None);
        };
        let target = EditorContext::new(
            ctx.text.clone(),
            TextSelection::new(completion.replace_start, completion.replace_end),
        );
        let command = EditCommand::InsertText {
            text: completion.insert_text,
        };
        self.history.execute(&command, &target).map(Some)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.formatters.stats()
    }

    pub fn timings(&self) -> Vec<TimingSummary> {
        self.timings.summary()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> EditorSession {
        EditorSession::new(EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_parse_reuses_model_for_same_text() {
        let mut s = session();
        let a = s.parse("[G]la");
        let b = s.parse("[G]la");
        assert!(Rc::ptr_eq(&a, &b));
        let c = s.parse("[D]la");
        assert!(!Rc::ptr_eq(&a, &c));
    }

    #[test]
    fn test_format_uses_cache() {
        let mut s = session();
        let options = FormatOptions::default();
        s.format("[G]la", OutputKind::Text, &options).unwrap();
        s.format("[D]la", OutputKind::Text, &options).unwrap();
        let stats = s.cache_stats();
        assert_eq!((stats.hits, stats.misses, stats.size), (1, 1, 1));
    }

    #[test]
    fn test_accept_autocomplete_is_undoable() {
        let mut s = session();
        let ctx = EditorContext::with_cursor("{tit", 4);
        let view = s.update_autocomplete(&ctx.text, ctx.cursor).unwrap().unwrap();
        assert_eq!(view.suggestions[0].label, "title");

        let result = s.accept_autocomplete(&ctx).unwrap().unwrap();
        assert_eq!(result.new_text.as_deref(), Some("{title: "));
        assert_eq!(result.new_selection, Some(TextSelection::caret(8)));

        let after = EditorContext::with_cursor("{title: ", 8);
        let undone = s.undo(&after).unwrap();
        assert_eq!(undone.new_text.as_deref(), Some("{tit"));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = EngineConfig::default();
        config.history.max_depth = 0;
        assert!(EditorSession::new(config).is_err());
    }
}
