//! File and directory handling tests

use legacyconv::cli::path_mapping;
use legacyconv::conversion::{ConversionConfig, SerializedDataConverter};
use legacyconv::error::ConversionError;
use legacyconv::parser::{directory, SerializedSource};
use pretty_assertions::assert_eq;
use std::fs;
use std::io::Write;
use tempfile::tempdir;

#[test]
fn test_convert_record_file() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("item.ser");
    fs::write(&path, "a:1:{s:3:\"qty\";i:2;}\n").unwrap();

    let converter = SerializedDataConverter::default();
    let output = converter
        .convert_from_source(&SerializedSource::File(path))
        .unwrap();
    assert_eq!(output, r#"{"qty":2}"#);
}

#[test]
fn test_missing_file_is_io_error() {
    let converter = SerializedDataConverter::default();
    let result =
        converter.convert_from_source(&SerializedSource::File("does/not/exist.ser".into()));
    assert!(matches!(
        result.unwrap_err(),
        ConversionError::Conversion { .. }
    ));
}

#[test]
fn test_oversized_file_rejected_before_read() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("big.ser");
    let mut file = fs::File::create(&path).unwrap();
    file.write_all(&vec![b'a'; 4096]).unwrap();

    let config = ConversionConfig::default().with_max_input_size(1024);
    let converter = SerializedDataConverter::from_config(config);

    let result = converter.convert_from_source(&SerializedSource::File(path));
    let message = result.unwrap_err().to_string();
    assert!(message.contains("too large"));
}

#[test]
fn test_directory_discovery_and_mapping() {
    let tmp = tempdir().unwrap();
    let input_dir = tmp.path().join("in");
    let output_dir = tmp.path().join("out");
    fs::create_dir_all(input_dir.join("quotes")).unwrap();

    fs::write(input_dir.join("order_1.ser"), "i:1;").unwrap();
    fs::write(input_dir.join("quotes/item_2.ser"), "i:2;").unwrap();
    fs::write(input_dir.join("notes.txt"), "not a record").unwrap();

    let flat = directory::find_record_files(&input_dir, "ser", false).unwrap();
    assert_eq!(flat.len(), 1);

    let files = directory::find_record_files(&input_dir, "ser", true).unwrap();
    assert_eq!(files.len(), 2);

    let converter = SerializedDataConverter::default();
    for file in &files {
        let json = converter
            .convert_from_source(&SerializedSource::File(file.clone()))
            .unwrap();
        let out_path = path_mapping::map_input_to_output(&input_dir, file, &output_dir);
        fs::create_dir_all(out_path.parent().unwrap()).unwrap();
        fs::write(&out_path, json).unwrap();
    }

    assert_eq!(
        fs::read_to_string(output_dir.join("order_1.json")).unwrap(),
        "1"
    );
    assert_eq!(
        fs::read_to_string(output_dir.join("quotes/item_2.json")).unwrap(),
        "2"
    );
}

#[test]
fn test_string_source_round_trip() {
    let converter = SerializedDataConverter::default();
    let source = SerializedSource::String("a:1:{s:3:\"foo\";s:3:\"bar\";}".to_string());
    assert_eq!(
        converter.convert_from_source(&source).unwrap(),
        r#"{"foo":"bar"}"#
    );
}
