//! Shared helpers for the WASM API
//!
//! Conversions between `JsValue` and engine types, and the mapping from
//! `EngineError` to JS exceptions.

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::error::EngineError;

// ============================================================================
// Serialization
// ============================================================================

/// Deserialize a JsValue into a Rust type, with an error context for logging
pub fn deserialize<T: DeserializeOwned>(value: JsValue, error_context: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| {
        log::error!("{}: deserialization failed: {}", error_context, e);
        JsValue::from_str(&format!("{}: {}", error_context, e))
    })
}

/// Deserialize an optional argument; `undefined` and `null` yield the default
pub fn deserialize_or_default<T: DeserializeOwned + Default>(
    value: JsValue,
    error_context: &str,
) -> Result<T, JsValue> {
    if value.is_undefined() || value.is_null() {
        Ok(T::default())
    } else {
        deserialize(value, error_context)
    }
}

/// Serialize a Rust value into a plain JS object
///
/// Maps become plain objects rather than `Map` instances.
pub fn serialize<T: Serialize + ?Sized>(
    value: &T,
    error_context: &str,
) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value.serialize(&serializer).map_err(|e| {
        log::error!("{}: serialization failed: {}", error_context, e);
        JsValue::from_str(&format!("{}: {}", error_context, e))
    })
}

// ============================================================================
// Errors and validation
// ============================================================================

/// Turn an engine error into a thrown JS error
pub fn engine_error(err: EngineError) -> JsValue {
    log::warn!("{}", err);
    js_sys::Error::new(&err.to_string()).into()
}

/// Check a JS-side char offset against a buffer
pub fn checked_offset(offset: i32, text: &str) -> Result<usize, JsValue> {
    let len = text.chars().count();
    if offset < 0 || offset as usize > len {
        return Err(engine_error(EngineError::InvalidOffset {
            offset: offset as i64,
            len,
        }));
    }
    Ok(offset as usize)
}
