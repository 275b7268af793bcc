//! Core conversion engine for legacy-serialized to JSON migration

use crate::conversion::config::ConversionConfig;
use crate::conversion::limits;
use crate::conversion::rules;
use crate::error::{ConversionResult, DataConversionError};
use crate::formatter::{JsonEncoder, JsonSerializer};
use crate::parser::{PhpUnserializer, SerializedSource, Unserializer};

/// Records whose option data was already migrated (or was empty to begin
/// with) are stored as the JSON empty array. They pass through untouched,
/// without invoking the decoder or encoder.
pub const EMPTY_PAYLOAD: &str = "[]";

/// Converter for a single legacy-serialized record.
///
/// Holds the two injected collaborators: a legacy decoder and a JSON
/// encoder. The converter itself keeps no mutable state, so one instance can
/// serve any number of records, concurrently if the collaborators allow it.
pub struct SerializedDataConverter<U = PhpUnserializer, J = JsonEncoder> {
    unserializer: U,
    json: J,
    config: ConversionConfig,
}

impl SerializedDataConverter {
    /// Create a converter with the default collaborators tuned by `config`
    pub fn from_config(config: ConversionConfig) -> Self {
        let unserializer = PhpUnserializer::new().with_max_depth(config.max_depth);
        let json = JsonEncoder::new().with_pretty(config.pretty);
        Self {
            unserializer,
            json,
            config,
        }
    }
}

impl Default for SerializedDataConverter {
    fn default() -> Self {
        Self::from_config(ConversionConfig::default())
    }
}

impl<U: Unserializer, J: JsonSerializer> SerializedDataConverter<U, J> {
    /// Create a converter with injected collaborators and default config
    pub fn new(unserializer: U, json: J) -> Self {
        Self::with_config(unserializer, json, ConversionConfig::default())
    }

    /// Create a converter with injected collaborators and explicit config
    pub fn with_config(unserializer: U, json: J, config: ConversionConfig) -> Self {
        Self {
            unserializer,
            json,
            config,
        }
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Convert one legacy-serialized record to JSON text.
    ///
    /// The empty-payload marker is returned unchanged. Any decode failure,
    /// at the top level or inside a nested field, aborts the record with
    /// `DataConversionError`; nothing partial is returned.
    pub fn convert(&self, value: &str) -> ConversionResult<String> {
        if value == EMPTY_PAYLOAD {
            return Ok(value.to_string());
        }

        limits::check_input_size(value, &self.config)?;

        Ok(self.convert_payload(value)?)
    }

    /// Read a single-record source and convert its trimmed content
    pub fn convert_from_source(&self, source: &SerializedSource) -> ConversionResult<String> {
        limits::check_source_size_before_read(source, &self.config)?;

        let content = source
            .read_content()
            .map_err(|e| limits::io_error(e, source))?;

        self.convert(content.trim_end_matches(['\n', '\r']))
    }

    /// The rewrite pipeline: decode, apply field rules in order, unwrap
    /// token metadata last, encode.
    fn convert_payload(&self, value: &str) -> Result<String, DataConversionError> {
        let mut payload = self.unserializer.unserialize(value)?;

        if let Some(map) = payload.as_object_mut() {
            rules::rewrite_bundle_attributes(map, &self.unserializer, &self.json)?;
            rules::rewrite_file_option_values(map, &self.unserializer, &self.json)?;
        }
        let payload = rules::unwrap_token_metadata(payload);

        Ok(self.json.serialize(&payload)?)
    }
}
