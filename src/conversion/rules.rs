//! Field rewrite rules for decoded legacy payloads
//!
//! The converter applies these rules in the order they are declared here:
//! bundle attributes, then file option values, then the token-metadata
//! unwrap. The unwrap runs last and discards every other top-level key,
//! including ones the earlier rules already rewrote. Each rule operates on a
//! fixed key path; an absent key is never an error.

use crate::error::DataConversionError;
use crate::formatter::JsonSerializer;
use crate::parser::Unserializer;
use serde_json::{Map, Value};

/// Bundle products store their selection attributes as an independently
/// serialized string under this key.
pub const BUNDLE_SELECTION_ATTRIBUTES: &str = "bundle_selection_attributes";

/// Custom options of a purchased item
pub const OPTIONS: &str = "options";

/// Discriminator of a custom option entry
pub const OPTION_TYPE: &str = "option_type";

/// Value of a custom option entry
pub const OPTION_VALUE: &str = "option_value";

/// The one option type whose value is itself serialized
pub const OPTION_TYPE_FILE: &str = "file";

/// Payment token metadata wrapper key
pub const TOKEN_METADATA: &str = "token_metadata";

/// Re-encode a nested serialized string as JSON text
fn reencode<U: Unserializer, J: JsonSerializer>(
    raw: &str,
    unserializer: &U,
    json: &J,
) -> Result<String, DataConversionError> {
    let decoded = unserializer.unserialize(raw)?;
    Ok(json.serialize(&decoded)?)
}

/// Replace a string `bundle_selection_attributes` value with its JSON
/// re-encoding. Non-string values are left untouched.
pub fn rewrite_bundle_attributes<U: Unserializer, J: JsonSerializer>(
    payload: &mut Map<String, Value>,
    unserializer: &U,
    json: &J,
) -> Result<(), DataConversionError> {
    let raw = match payload.get(BUNDLE_SELECTION_ATTRIBUTES) {
        Some(Value::String(raw)) => raw.clone(),
        _ => return Ok(()),
    };
    let encoded = reencode(&raw, unserializer, json)?;
    payload.insert(BUNDLE_SELECTION_ATTRIBUTES.to_string(), Value::String(encoded));
    Ok(())
}

/// Replace the string `option_value` of every `file`-typed entry under
/// `options` with its JSON re-encoding. Other entries pass through verbatim
/// and entry order is preserved.
pub fn rewrite_file_option_values<U: Unserializer, J: JsonSerializer>(
    payload: &mut Map<String, Value>,
    unserializer: &U,
    json: &J,
) -> Result<(), DataConversionError> {
    let entries = match payload.get_mut(OPTIONS) {
        Some(Value::Array(entries)) => entries,
        _ => return Ok(()),
    };

    for entry in entries {
        let option = match entry.as_object_mut() {
            Some(option) => option,
            None => continue,
        };
        if option.get(OPTION_TYPE).and_then(Value::as_str) != Some(OPTION_TYPE_FILE) {
            continue;
        }
        let raw = match option.get(OPTION_VALUE) {
            Some(Value::String(raw)) => raw.clone(),
            _ => continue,
        };
        let encoded = reencode(&raw, unserializer, json)?;
        option.insert(OPTION_VALUE.to_string(), Value::String(encoded));
    }

    Ok(())
}

/// When a `token_metadata` key is present, its value replaces the whole
/// payload; every sibling key is dropped.
pub fn unwrap_token_metadata(payload: Value) -> Value {
    match payload {
        Value::Object(mut map) => match map.remove(TOKEN_METADATA) {
            Some(metadata) => metadata,
            None => Value::Object(map),
        },
        other => other,
    }
}
