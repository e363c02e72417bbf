//! Autocomplete for directives and chords
//!
//! `detect` decides whether the cursor sits inside an open `{...` or `[...`
//! token; `AutocompleteState` is the per-session object that keeps the list
//! selection and Escape-dismissal between keystrokes.

pub mod suggestions;

pub use suggestions::{suggestions_for, Suggestion};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::models::SongModel;

/// Characters allowed between the trigger bracket and the cursor
static FILTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_:\-\s]*$").expect("valid filter regex"));

/// An open directive or chord token under the cursor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutocompleteContext {
    /// `'{'` or `'['`
    pub trigger_char: char,
    /// Char offset of the trigger bracket
    pub trigger_position: usize,
    /// Text between the trigger bracket and the cursor
    pub filter_text: String,
    pub is_visible: bool,
    pub selected_index: usize,
}

fn closer_for(open: char) -> char {
    if open == '{' {
        '}'
    } else {
        ']'
    }
}

/// Find the open token containing `cursor`, if any
pub fn detect(text: &str, cursor: usize) -> Result<Option<AutocompleteContext>> {
    let chars: Vec<char> = text.chars().collect();
    if cursor > chars.len() {
        log::warn!("autocomplete cursor {} beyond length {}", cursor, chars.len());
        return Err(EngineError::InvalidOffset {
            offset: cursor as i64,
            len: chars.len(),
        });
    }

    // Nearest opener on the current line
    let mut open_at = None;
    for i in (0..cursor).rev() {
        match chars[i] {
            '\n' => break,
            '{' | '[' => {
                open_at = Some(i);
                break;
            }
            _ => {}
        }
    }
    let Some(open_at) = open_at else {
        return Ok(None);
    };
    let trigger = chars[open_at];
    let closer = closer_for(trigger);

    let filter: String = chars[open_at + 1..cursor].iter().collect();
    if !FILTER_RE.is_match(&filter) {
        return Ok(None);
    }

    // Another unclosed opener earlier in the same token run means nesting
    for &ch in chars[..open_at].iter().rev() {
        match ch {
            '\n' | '}' | ']' => break,
            '{' | '[' => return Ok(None),
            _ => {}
        }
    }

    // Already closed after the cursor
    for &ch in &chars[cursor..] {
        if ch == '\n' || ch == trigger {
            break;
        }
        if ch == closer {
            return Ok(None);
        }
    }

    Ok(Some(AutocompleteContext {
        trigger_char: trigger,
        trigger_position: open_at,
        filter_text: filter,
        is_visible: true,
        selected_index: 0,
    }))
}

/// Edit produced by accepting a suggestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Completion {
    /// Chars `[replace_start, replace_end)` are replaced by `insert_text`
    pub replace_start: usize,
    pub replace_end: usize,
    pub insert_text: String,
    /// Caret position after the edit
    pub cursor: usize,
}

/// Context plus its suggestions, as handed to the UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutocompleteView {
    pub context: AutocompleteContext,
    pub suggestions: Vec<Suggestion>,
}

/// Per-session autocomplete state
#[derive(Debug, Clone)]
pub struct AutocompleteState {
    context: Option<AutocompleteContext>,
    suggestions: Vec<Suggestion>,
    cursor: usize,
    /// Trigger position of a token the user dismissed with Escape
    dismissed_at: Option<usize>,
    max_suggestions: usize,
}

impl Default for AutocompleteState {
    fn default() -> Self {
        Self::new(12)
    }
}

impl AutocompleteState {
    pub fn new(max_suggestions: usize) -> Self {
        Self {
            context: None,
            suggestions: Vec::new(),
            cursor: 0,
            dismissed_at: None,
            max_suggestions,
        }
    }

    /// Re-detect after a keystroke or cursor move
    pub fn update(
        &mut self,
        text: &str,
        cursor: usize,
        model: Option<&SongModel>,
    ) -> Result<Option<AutocompleteView>> {
        self.cursor = cursor;
        let Some(mut ctx) = detect(text, cursor)? else {
            self.reset();
            return Ok(None);
        };

        if self.dismissed_at.is_some() && self.dismissed_at != Some(ctx.trigger_position) {
            self.dismissed_at = None;
        }

        let suggestions = suggestions_for(&ctx, model, self.max_suggestions);
        ctx.is_visible = self.dismissed_at.is_none() && !suggestions.is_empty();
        if let Some(prev) = &self.context {
            if prev.trigger_position == ctx.trigger_position
                && prev.filter_text == ctx.filter_text
            {
                ctx.selected_index = prev.selected_index.min(suggestions.len().saturating_sub(1));
            }
        }

        self.context = Some(ctx);
        self.suggestions = suggestions;
        Ok(self.view())
    }

    /// Current context and suggestions, if a token is open
    pub fn view(&self) -> Option<AutocompleteView> {
        self.context.as_ref().map(|context| AutocompleteView {
            context: context.clone(),
            suggestions: self.suggestions.clone(),
        })
    }

    pub fn is_visible(&self) -> bool {
        self.context.as_ref().is_some_and(|c| c.is_visible)
    }

    /// Move the highlighted entry; wraps at both ends
    pub fn move_selection(&mut self, delta: i32) -> Option<usize> {
        let len = self.suggestions.len();
        let ctx = self.context.as_mut().filter(|c| c.is_visible)?;
        if len == 0 {
            return None;
        }
        let next = (ctx.selected_index as i64 + delta as i64).rem_euclid(len as i64) as usize;
        ctx.selected_index = next;
        Some(next)
    }

    /// Hide the list until the cursor leaves this token
    pub fn dismiss(&mut self) {
        if let Some(ctx) = self.context.as_mut() {
            ctx.is_visible = false;
            self.dismissed_at = Some(ctx.trigger_position);
        }
    }

    /// Take the highlighted suggestion, closing the list
    pub fn accept(&mut self) -> Option<Completion> {
        let ctx = self.context.as_ref().filter(|c| c.is_visible)?;
        let suggestion = self.suggestions.get(ctx.selected_index)?;
        let replace_start = ctx.trigger_position + 1;
        let completion = Completion {
            replace_start,
            replace_end: self.cursor,
            insert_text: suggestion.insert_text.clone(),
            cursor: replace_start + suggestion.insert_text.chars().count(),
        };
        log::debug!("autocomplete accepted '{}'", suggestion.label);
        self.reset();
        Some(completion)
    }

    fn reset(&mut self) {
        self.context = None;
        self.suggestions.clear();
        self.dismissed_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_open_directive() {
        let ctx = detect("{tit", 4).unwrap().unwrap();
        assert_eq!(ctx.trigger_char, '{');
        assert_eq!(ctx.trigger_position, 0);
        assert_eq!(ctx.filter_text, "tit");
        assert!(ctx.is_visible);
    }

    #[test]
    fn test_detect_closed_token() {
        assert_eq!(detect("{title}", 7).unwrap(), None);
        // Cursor inside a token that is already closed
        assert_eq!(detect("{title}", 3).unwrap(), None);
        assert_eq!(detect("[G]la", 5).unwrap(), None);
    }

    #[test]
    fn test_detect_chord_mid_line() {
        let ctx = detect("[G]Amazing [D", 13).unwrap().unwrap();
        assert_eq!(ctx.trigger_char, '[');
        assert_eq!(ctx.trigger_position, 11);
        assert_eq!(ctx.filter_text, "D");
    }

    #[test]
    fn test_detect_rejects_bad_filter_and_nesting() {
        assert_eq!(detect("{{x", 3).unwrap(), None);
        assert_eq!(detect("{ti.t", 5).unwrap(), None);
        assert_eq!(detect("{title\nx", 8).unwrap(), None);
    }

    #[test]
    fn test_detect_next_token_does_not_close() {
        let ctx = detect("[ [D]", 1).unwrap().unwrap();
        assert_eq!(ctx.trigger_position, 0);
    }

    #[test]
    fn test_detect_cursor_out_of_range() {
        assert!(matches!(
            detect("abc", 4),
            Err(EngineError::InvalidOffset { offset: 4, len: 3 })
        ));
    }

    #[test]
    fn test_state_wraps_and_accepts() {
        let mut state = AutocompleteState::new(12);
        let view = state.update("{ti", 3, None).unwrap().unwrap();
        assert_eq!(view.suggestions[0].label, "time");
        let last = view.suggestions.len() - 1;
        assert_eq!(state.move_selection(-1), Some(last));
        assert_eq!(state.move_selection(1), Some(0));
        assert_eq!(state.move_selection(1), Some(1));

        let completion = state.accept().unwrap();
        assert_eq!(completion.replace_start, 1);
        assert_eq!(completion.replace_end, 3);
        assert_eq!(completion.insert_text, "title: ");
        assert_eq!(completion.cursor, 8);
        assert!(!state.is_visible());
    }

    #[test]
    fn test_dismiss_lasts_until_token_changes() {
        let mut state = AutocompleteState::new(12);
        state.update("{ti", 3, None).unwrap();
        state.dismiss();
        let view = state.update("{tit", 4, None).unwrap().unwrap();
        assert!(!view.context.is_visible);
        assert_eq!(state.accept(), None);

        // Leaving the token clears the dismissal
        assert!(state.update("{tit} ", 6, None).unwrap().is_none());
        let view = state.update("{tit} [", 7, None).unwrap().unwrap();
        assert!(view.context.is_visible);
    }
}
