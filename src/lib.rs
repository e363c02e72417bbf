//! ChordPro song sheet engine
//!
//! Parses ChordPro notation into a song model, transposes it, renders it to
//! screen HTML, printable HTML, plain text or ChordPro source, and backs the
//! editor with undo/redo history, autocomplete and validation. Compiled to
//! WASM for the browser editor; the same API is usable natively.

pub mod api;
pub mod autocomplete;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod models;
pub mod parse;
pub mod renderers;
pub mod session;
pub mod text;
pub mod transposition;
pub mod undo;
pub mod utils;

// Re-export commonly used types
pub use config::EngineConfig;
pub use error::{EngineError, Result};
pub use models::*;
pub use parse::{parse, segment};
pub use renderers::{FormatOptions, Formatter, OutputKind};
pub use session::EditorSession;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // Fails only when the host page already installed a logger
    #[cfg(feature = "console_log")]
    let _ = console_log::init_with_level(log::Level::Debug);

    log::info!("ChordPro engine WASM module initialized");
}
