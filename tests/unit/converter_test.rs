//! Unit tests for the serialized-data converter
//!
//! The decoder and encoder are replaced by scripted stand-ins that record
//! every call, so these tests pin down the exact rewrite choreography:
//! which nested fields get decoded, what the encoder receives, and how many
//! times each collaborator runs.

use assert_matches::assert_matches;
use legacyconv::conversion::SerializedDataConverter;
use legacyconv::error::{
    ConversionError, DataConversionError, EncodeError, UnserializeError, UnserializeResult,
};
use legacyconv::formatter::JsonSerializer;
use legacyconv::parser::Unserializer;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::cell::RefCell;
use std::rc::Rc;

/// Decoder stand-in: maps exact inputs to canned values, records every call,
/// and fails on anything unscripted.
struct ScriptedUnserializer {
    responses: Vec<(String, Value)>,
    calls: Rc<RefCell<Vec<String>>>,
}

impl ScriptedUnserializer {
    fn new(responses: &[(&str, Value)]) -> (Self, Rc<RefCell<Vec<String>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let stub = Self {
            responses: responses
                .iter()
                .map(|(input, value)| (input.to_string(), value.clone()))
                .collect(),
            calls: Rc::clone(&calls),
        };
        (stub, calls)
    }
}

impl Unserializer for ScriptedUnserializer {
    fn unserialize(&self, input: &str) -> UnserializeResult<Value> {
        self.calls.borrow_mut().push(input.to_string());
        self.responses
            .iter()
            .find(|(scripted, _)| scripted == input)
            .map(|(_, value)| value.clone())
            .ok_or_else(|| UnserializeError::new(format!("cannot unserialize: {}", input)))
    }
}

/// Encoder stand-in: maps exact values to canned text and records every call.
struct ScriptedEncoder {
    responses: Vec<(Value, String)>,
    calls: Rc<RefCell<Vec<Value>>>,
}

impl ScriptedEncoder {
    fn new(responses: &[(Value, &str)]) -> (Self, Rc<RefCell<Vec<Value>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let stub = Self {
            responses: responses
                .iter()
                .map(|(value, text)| (value.clone(), text.to_string()))
                .collect(),
            calls: Rc::clone(&calls),
        };
        (stub, calls)
    }
}

impl JsonSerializer for ScriptedEncoder {
    fn serialize(&self, value: &Value) -> Result<String, EncodeError> {
        self.calls.borrow_mut().push(value.clone());
        self.responses
            .iter()
            .find(|(scripted, _)| scripted == value)
            .map(|(_, text)| text.clone())
            .ok_or_else(|| EncodeError::new("unexpected value"))
    }
}

#[test]
fn test_convert_plain_payload() {
    let data = json!({"info_buyRequest": {"product": 1, "qty": 2}});
    let (unserializer, decode_calls) = ScriptedUnserializer::new(&[("serialized data", data.clone())]);
    let (encoder, encode_calls) = ScriptedEncoder::new(&[(data.clone(), "json encoded data")]);

    let converter = SerializedDataConverter::new(unserializer, encoder);
    let result = converter.convert("serialized data").unwrap();

    assert_eq!(result, "json encoded data");
    assert_eq!(*decode_calls.borrow(), vec!["serialized data"]);
    assert_eq!(*encode_calls.borrow(), vec![data]);
}

#[test]
fn test_convert_bundle_attributes() {
    let data = json!({
        "info_buyRequest": {"product": 1, "qty": 2},
        "bundle_selection_attributes": "serialized bundle attributes"
    });
    let bundle_attributes = json!({"foo": "bar"});
    let rewritten = json!({
        "info_buyRequest": {"product": 1, "qty": 2},
        "bundle_selection_attributes": "json encoded bundle attributes"
    });

    let (unserializer, decode_calls) = ScriptedUnserializer::new(&[
        ("serialized data", data),
        ("serialized bundle attributes", bundle_attributes.clone()),
    ]);
    let (encoder, encode_calls) = ScriptedEncoder::new(&[
        (bundle_attributes.clone(), "json encoded bundle attributes"),
        (rewritten.clone(), "json encoded data"),
    ]);

    let converter = SerializedDataConverter::new(unserializer, encoder);
    let result = converter.convert("serialized data").unwrap();

    assert_eq!(result, "json encoded data");
    // nested field decoded exactly once, after the top-level payload
    assert_eq!(
        *decode_calls.borrow(),
        vec!["serialized data", "serialized bundle attributes"]
    );
    // nested value encoded first, whole rewritten payload second
    assert_eq!(*encode_calls.borrow(), vec![bundle_attributes, rewritten]);
}

#[test]
fn test_convert_custom_options_type_file() {
    let data = json!({
        "info_buyRequest": {"product": 1, "qty": 2},
        "options": [
            {"option_type": "file", "option_value": "serialized option value"},
            {"option_type": "text", "option_value": "option 2"}
        ]
    });
    let option_value = json!({"foo": "bar"});
    let rewritten = json!({
        "info_buyRequest": {"product": 1, "qty": 2},
        "options": [
            {"option_type": "file", "option_value": "json encoded option value"},
            {"option_type": "text", "option_value": "option 2"}
        ]
    });

    let (unserializer, decode_calls) = ScriptedUnserializer::new(&[
        ("serialized data", data),
        ("serialized option value", option_value.clone()),
    ]);
    let (encoder, encode_calls) = ScriptedEncoder::new(&[
        (option_value.clone(), "json encoded option value"),
        (rewritten.clone(), "json encoded data"),
    ]);

    let converter = SerializedDataConverter::new(unserializer, encoder);
    let result = converter.convert("serialized data").unwrap();

    assert_eq!(result, "json encoded data");
    assert_eq!(
        *decode_calls.borrow(),
        vec!["serialized data", "serialized option value"]
    );
    assert_eq!(*encode_calls.borrow(), vec![option_value, rewritten]);
}

#[test]
fn test_convert_corrupted_data() {
    let (unserializer, _) = ScriptedUnserializer::new(&[]);
    let (encoder, encode_calls) = ScriptedEncoder::new(&[]);

    let converter = SerializedDataConverter::new(unserializer, encoder);
    let error = converter.convert("serialized data").unwrap_err();

    assert_matches!(
        error,
        ConversionError::DataConversion(DataConversionError::Corrupted(_))
    );
    // nothing was encoded for the failed record
    assert!(encode_calls.borrow().is_empty());
}

#[test]
fn test_convert_corrupted_nested_field() {
    let data = json!({
        "info_buyRequest": {"product": 1, "qty": 2},
        "bundle_selection_attributes": "corrupted nested data"
    });
    let (unserializer, decode_calls) = ScriptedUnserializer::new(&[("serialized data", data)]);
    let (encoder, encode_calls) = ScriptedEncoder::new(&[]);

    let converter = SerializedDataConverter::new(unserializer, encoder);
    let error = converter.convert("serialized data").unwrap_err();

    assert_matches!(
        error,
        ConversionError::DataConversion(DataConversionError::Corrupted(_))
    );
    assert_eq!(
        *decode_calls.borrow(),
        vec!["serialized data", "corrupted nested data"]
    );
    assert!(encode_calls.borrow().is_empty());
}

#[test]
fn test_convert_skip_conversion() {
    let (unserializer, decode_calls) = ScriptedUnserializer::new(&[]);
    let (encoder, encode_calls) = ScriptedEncoder::new(&[]);

    let converter = SerializedDataConverter::new(unserializer, encoder);
    let result = converter.convert("[]").unwrap();

    assert_eq!(result, "[]");
    // neither collaborator runs for already-converted empty payloads
    assert!(decode_calls.borrow().is_empty());
    assert!(encode_calls.borrow().is_empty());
}

#[test]
fn test_convert_token_metadata() {
    let data = json!({
        "info_buyRequest": {"product": 1, "qty": 2},
        "token_metadata": {"customer_id": 1, "public_hash": "someHash"}
    });
    let metadata = json!({"customer_id": 1, "public_hash": "someHash"});

    let (unserializer, decode_calls) = ScriptedUnserializer::new(&[("serialized data", data)]);
    let (encoder, encode_calls) = ScriptedEncoder::new(&[(metadata.clone(), "json encoded data")]);

    let converter = SerializedDataConverter::new(unserializer, encoder);
    let result = converter.convert("serialized data").unwrap();

    assert_eq!(result, "json encoded data");
    assert_eq!(*decode_calls.borrow(), vec!["serialized data"]);
    // sibling keys are dropped: the encoder sees only the metadata mapping
    assert_eq!(*encode_calls.borrow(), vec![metadata]);
}
