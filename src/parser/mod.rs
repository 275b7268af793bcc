//! Legacy-serialized input handling

pub mod directory;
pub mod php;

pub use php::PhpUnserializer;

use crate::error::UnserializeResult;
use serde_json::Value;
use std::io::Read;
use std::path::PathBuf;

/// Capability to decode legacy-serialized text into a structured value.
///
/// Implementations must report malformed input through the returned error,
/// never through panics or sentinel values, so the converter can translate
/// every decode failure uniformly.
pub trait Unserializer {
    fn unserialize(&self, input: &str) -> UnserializeResult<Value>;
}

/// Source of serialized record data
#[derive(Debug, Clone, PartialEq)]
pub enum SerializedSource {
    /// Raw serialized string input
    String(String),
    /// Single record file path
    File(PathBuf),
    /// Directory containing record files
    Directory(PathBuf),
    /// Standard input stream
    Stdin,
}

impl SerializedSource {
    /// Get a human-readable description of the source
    pub fn description(&self) -> String {
        match self {
            SerializedSource::String(_) => "string input".to_string(),
            SerializedSource::File(path) => format!("file: {}", path.display()),
            SerializedSource::Directory(path) => format!("directory: {}", path.display()),
            SerializedSource::Stdin => "standard input".to_string(),
        }
    }

    /// Check if the source exists and is accessible
    pub fn exists(&self) -> bool {
        match self {
            SerializedSource::String(_) | SerializedSource::Stdin => true,
            SerializedSource::File(path) => path.is_file(),
            SerializedSource::Directory(path) => path.is_dir(),
        }
    }

    /// Get the size of the source in bytes, when known without reading it
    pub fn estimated_size(&self) -> Option<u64> {
        match self {
            SerializedSource::String(s) => Some(s.len() as u64),
            SerializedSource::File(path) => std::fs::metadata(path).ok().map(|m| m.len()),
            // Directory sizes are not estimated; stdin is unknown until read
            SerializedSource::Directory(_) | SerializedSource::Stdin => None,
        }
    }

    /// Check if this source holds a single record (vs multiple files)
    pub fn is_single_record(&self) -> bool {
        !matches!(self, SerializedSource::Directory(_))
    }

    /// Read the source content as a string
    pub fn read_content(&self) -> Result<String, std::io::Error> {
        match self {
            SerializedSource::String(content) => Ok(content.clone()),
            SerializedSource::File(path) => std::fs::read_to_string(path),
            SerializedSource::Stdin => {
                let mut buffer = String::new();
                std::io::stdin().read_to_string(&mut buffer)?;
                Ok(buffer)
            }
            SerializedSource::Directory(_) => Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "cannot read directory as a single record",
            )),
        }
    }
}
