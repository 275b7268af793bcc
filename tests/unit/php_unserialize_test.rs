//! Unit tests for the PHP native serialization decoder

use legacyconv::parser::{PhpUnserializer, Unserializer};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn decode(input: &str) -> Value {
    PhpUnserializer::new()
        .unserialize(input)
        .unwrap_or_else(|e| panic!("failed to decode {:?}: {}", input, e))
}

fn decode_err(input: &str) -> String {
    PhpUnserializer::new()
        .unserialize(input)
        .expect_err("expected a decode failure")
        .message
}

#[test]
fn test_scalars() {
    assert_eq!(decode("N;"), json!(null));
    assert_eq!(decode("b:0;"), json!(false));
    assert_eq!(decode("b:1;"), json!(true));
    assert_eq!(decode("i:42;"), json!(42));
    assert_eq!(decode("i:-7;"), json!(-7));
    assert_eq!(decode("d:1.5;"), json!(1.5));
    assert_eq!(decode("d:-0.25;"), json!(-0.25));
    assert_eq!(decode("s:5:\"hello\";"), json!("hello"));
    assert_eq!(decode("s:0:\"\";"), json!(""));
}

#[test]
fn test_string_length_counts_bytes() {
    // "café" is five bytes in UTF-8
    assert_eq!(decode("s:5:\"café\";"), json!("café"));
    assert_eq!(decode("a:1:{s:4:\"name\";s:5:\"café\";}"), json!({"name": "café"}));
}

#[test]
fn test_string_may_contain_quotes_and_separators() {
    // the byte length delimits content, so structural characters pass through
    assert_eq!(decode("s:6:\"a\";b:c\";"), json!("a\";b:c"));
}

#[test]
fn test_sequential_array_becomes_list() {
    assert_eq!(decode("a:0:{}"), json!([]));
    assert_eq!(
        decode("a:3:{i:0;i:10;i:1;i:20;i:2;i:30;}"),
        json!([10, 20, 30])
    );
}

#[test]
fn test_associative_array_becomes_object_in_order() {
    let value = decode("a:2:{s:7:\"product\";i:1;s:3:\"qty\";i:2;}");
    assert_eq!(value, json!({"product": 1, "qty": 2}));

    let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["product", "qty"]);
}

#[test]
fn test_non_contiguous_integer_keys_become_object() {
    assert_eq!(
        decode("a:3:{i:0;s:4:\"zero\";s:3:\"two\";s:1:\"2\";i:5;s:4:\"five\";}"),
        json!({"0": "zero", "two": "2", "5": "five"})
    );
}

#[test]
fn test_duplicate_keys_keep_last_value() {
    assert_eq!(
        decode("a:2:{s:1:\"k\";i:1;s:1:\"k\";i:2;}"),
        json!({"k": 2})
    );
}

#[test]
fn test_nested_arrays() {
    assert_eq!(
        decode("a:2:{i:0;i:1;i:1;a:2:{i:0;i:2;i:1;a:2:{i:0;i:3;i:1;a:1:{i:0;i:4;}}}}"),
        json!([1, [2, [3, [4]]]])
    );
}

#[test]
fn test_objects_are_rejected() {
    let message = decode_err("O:8:\"stdClass\":0:{}");
    assert!(message.contains("objects"));
}

#[test]
fn test_references_are_rejected() {
    let message = decode_err("a:2:{i:0;i:1;i:1;r:2;}");
    assert!(message.contains("references"));
}

#[test]
fn test_non_finite_doubles_are_rejected() {
    assert!(decode_err("d:NAN;").contains("double"));
    assert!(decode_err("d:INF;").contains("double"));
}

#[test]
fn test_malformed_input_is_rejected() {
    assert!(decode_err("").contains("end of input"));
    assert!(decode_err("garbage").contains("unexpected token"));
    assert!(decode_err("i:12").contains("end of input"));
    assert!(decode_err("b:7;").contains("boolean"));
    assert!(decode_err("s:10:\"short\";").contains("length"));
    assert!(decode_err("a:1:{d:1.0;i:1;}").contains("key"));
}

#[test]
fn test_trailing_data_is_rejected() {
    assert!(decode_err("i:1;i:2;").contains("trailing data"));
    assert!(decode_err("a:0:{}x").contains("trailing data"));
}

#[test]
fn test_byte_length_splitting_multibyte_char_is_rejected() {
    // length 3 cuts the two-byte "é" in half
    let err = PhpUnserializer::new()
        .unserialize("s:3:\"café\";")
        .unwrap_err();
    assert!(err.message.contains("UTF-8") || err.message.contains("expected"));
}

#[test]
fn test_error_carries_offset_and_preview() {
    let err = PhpUnserializer::new()
        .unserialize("a:1:{s:3:\"foo\";q}")
        .unwrap_err();
    assert_eq!(err.offset, Some(15));
    assert!(err.input_preview.is_some());
}

#[test]
fn test_configured_depth_limit() {
    let shallow = PhpUnserializer::new().with_max_depth(3);
    assert!(shallow.unserialize("a:1:{i:0;a:1:{i:0;i:1;}}").is_ok());
    assert!(shallow
        .unserialize("a:1:{i:0;a:1:{i:0;a:1:{i:0;i:1;}}}")
        .unwrap_err()
        .message
        .contains("depth limit"));
}
