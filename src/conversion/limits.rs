//! Input size guards for conversion

use crate::conversion::config::ConversionConfig;
use crate::error::{ConversionError, ConversionErrorKind, ConversionResult};
use crate::parser::SerializedSource;

/// Check an in-memory record against the configured size limit
pub fn check_input_size(input: &str, config: &ConversionConfig) -> ConversionResult<()> {
    if input.len() > config.max_input_size {
        return Err(ConversionError::conversion(
            ConversionErrorKind::InputTooLarge {
                size: input.len(),
                limit: config.max_input_size,
            },
        ));
    }
    Ok(())
}

/// Check the source size before reading it, so an oversized file is rejected
/// without being loaded into memory.
pub fn check_source_size_before_read(
    source: &SerializedSource,
    config: &ConversionConfig,
) -> ConversionResult<()> {
    if let Some(size) = source.estimated_size() {
        if size > config.max_input_size as u64 {
            return Err(ConversionError::conversion(
                ConversionErrorKind::InputTooLarge {
                    size: size as usize,
                    limit: config.max_input_size,
                },
            ));
        }
    }
    Ok(())
}

/// Wrap a source read failure with its origin
pub fn io_error(error: std::io::Error, source: &SerializedSource) -> ConversionError {
    let path = match source {
        SerializedSource::File(path) | SerializedSource::Directory(path) => Some(path.clone()),
        _ => None,
    };
    ConversionError::conversion(ConversionErrorKind::io(error.to_string(), path))
}
