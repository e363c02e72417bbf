//! Stateful editing API
//!
//! `SongSession` wraps one `EditorSession` per open document. The host keeps
//! the instance alive for as long as the editor tab is open.

use wasm_bindgen::prelude::*;

use super::helpers::{checked_offset, deserialize, deserialize_or_default, engine_error, serialize};
use crate::config::EngineConfig;
use crate::models::EditorContext;
use crate::renderers::{FormatOptions, OutputKind};
use crate::session::EditorSession;
use crate::undo::EditCommand;

#[wasm_bindgen]
pub struct SongSession {
    inner: EditorSession,
}

/// Commands arrive either as a bare name ("undo", "indent") or as a tagged
/// object (`{type: "insertText", text: "a"}`)
fn command_from_js(command: JsValue) -> Result<EditCommand, JsValue> {
    if let Some(name) = command.as_string() {
        return EditCommand::from_name(&name).map_err(engine_error);
    }
    let value: serde_json::Value = deserialize(command, "execute command")?;
    EditCommand::from_json(value).map_err(engine_error)
}

#[wasm_bindgen]
impl SongSession {
    /// Create a session; `config` may be omitted for defaults
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<SongSession, JsValue> {
        let config: EngineConfig = deserialize_or_default(config, "SongSession config")?;
        let inner = EditorSession::new(config).map_err(engine_error)?;
        log::info!("song session created");
        Ok(SongSession { inner })
    }

    #[wasm_bindgen(js_name = getConfig)]
    pub fn get_config(&self) -> Result<JsValue, JsValue> {
        serialize(self.inner.config(), "config")
    }

    /// Parse the buffer into a song model
    pub fn parse(&mut self, text: &str) -> Result<JsValue, JsValue> {
        let model = self.inner.parse(text);
        serialize(&*model, "parse")
    }

    /// Sections of the buffer, for windowed rendering
    pub fn segment(&mut self, text: &str) -> Result<JsValue, JsValue> {
        serialize(&self.inner.sections(text), "segment")
    }

    /// Start over with a new document, clearing history and caches
    #[wasm_bindgen(js_name = loadSong)]
    pub fn load_song(&mut self, text: &str) -> Result<JsValue, JsValue> {
        let model = self.inner.load(text);
        serialize(&*model, "loadSong")
    }

    /// Render the buffer; `kind` is one of responsive, print, text, chordpro
    pub fn format(&mut self, text: &str, kind: &str, options: JsValue) -> Result<String, JsValue> {
        let kind: OutputKind = kind.parse().map_err(engine_error)?;
        let options: FormatOptions = deserialize_or_default(options, "format options")?;
        self.inner.format(text, kind, &options).map_err(engine_error)
    }

    /// Run an editing command against the editor's current state
    pub fn execute(&mut self, command: JsValue, context: JsValue) -> Result<JsValue, JsValue> {
        let command = command_from_js(command)?;
        let ctx: EditorContext = deserialize(context, "execute context")?;
        let result = self.inner.execute(&command, &ctx).map_err(engine_error)?;
        serialize(&result, "execute")
    }

    /// Like `execute` with an explicit clock, for hosts that batch input
    #[wasm_bindgen(js_name = executeAt)]
    pub fn execute_at(
        &mut self,
        command: JsValue,
        context: JsValue,
        now_ms: f64,
    ) -> Result<JsValue, JsValue> {
        let command = command_from_js(command)?;
        let ctx: EditorContext = deserialize(context, "executeAt context")?;
        let result = self
            .inner
            .execute_at(&command, &ctx, now_ms.max(0.0) as u64)
            .map_err(engine_error)?;
        serialize(&result, "executeAt")
    }

    pub fn undo(&mut self, context: JsValue) -> Result<JsValue, JsValue> {
        let ctx: EditorContext = deserialize(context, "undo context")?;
        let result = self.inner.undo(&ctx).map_err(engine_error)?;
        serialize(&result, "undo")
    }

    pub fn redo(&mut self, context: JsValue) -> Result<JsValue, JsValue> {
        let ctx: EditorContext = deserialize(context, "redo context")?;
        let result = self.inner.redo(&ctx).map_err(engine_error)?;
        serialize(&result, "redo")
    }

    #[wasm_bindgen(js_name = historyState)]
    pub fn history_state(&self) -> Result<JsValue, JsValue> {
        serialize(&self.inner.history_state(), "historyState")
    }

    /// Re-detect autocomplete; returns null when no token is open
    #[wasm_bindgen(js_name = updateAutocomplete)]
    pub fn update_autocomplete(&mut self, text: &str, cursor: i32) -> Result<JsValue, JsValue> {
        let cursor = checked_offset(cursor, text)?;
        match self.inner.update_autocomplete(text, cursor).map_err(engine_error)? {
            Some(view) => serialize(&view, "updateAutocomplete"),
            None => Ok(JsValue::NULL),
        }
    }

    /// Move the highlighted suggestion; returns the new index
    #[wasm_bindgen(js_name = moveAutocompleteSelection)]
    pub fn move_autocomplete_selection(&mut self, delta: i32) -> Option<u32> {
        self.inner.move_autocomplete_selection(delta).map(|i| i as u32)
    }

    #[wasm_bindgen(js_name = dismissAutocomplete)]
    pub fn dismiss_autocomplete(&mut self) {
        self.inner.dismiss_autocomplete();
    }

    /// Insert the highlighted suggestion; returns null when the list is closed
    #[wasm_bindgen(js_name = acceptAutocomplete)]
    pub fn accept_autocomplete(&mut self, context: JsValue) -> Result<JsValue, JsValue> {
        let ctx: EditorContext = deserialize(context, "acceptAutocomplete context")?;
        match self.inner.accept_autocomplete(&ctx).map_err(engine_error)? {
            Some(result) => serialize(&result, "acceptAutocomplete"),
            None => Ok(JsValue::NULL),
        }
    }

    #[wasm_bindgen(js_name = cacheStats)]
    pub fn cache_stats(&self) -> Result<JsValue, JsValue> {
        serialize(&self.inner.cache_stats(), "cacheStats")
    }

    pub fn timings(&self) -> Result<JsValue, JsValue> {
        serialize(&self.inner.timings(), "timings")
    }
}
