//! Legacy Data Converter
//!
//! A Rust CLI tool and library for migrating commerce option data persisted
//! in the legacy PHP native serialization format to JSON, including the
//! field-level rewriting of independently serialized nested values.

pub mod cli;
pub mod conversion;
pub mod error;
pub mod formatter;
pub mod parser;

// Re-export commonly used types
pub use conversion::{ConversionConfig, OnCorrupted, SerializedDataConverter, EMPTY_PAYLOAD};
pub use error::{ConversionError, ConversionResult, DataConversionError, UnserializeError};
pub use formatter::{JsonEncoder, JsonSerializer};
pub use parser::{PhpUnserializer, SerializedSource, Unserializer};

/// Convert one legacy-serialized record to JSON with default configuration
pub fn convert_serialized(value: &str) -> ConversionResult<String> {
    SerializedDataConverter::default().convert(value)
}

/// Convert one legacy-serialized record to JSON with custom configuration
pub fn convert_serialized_with_config(
    value: &str,
    config: &ConversionConfig,
) -> ConversionResult<String> {
    SerializedDataConverter::from_config(config.clone()).convert(value)
}
