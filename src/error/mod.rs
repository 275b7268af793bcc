//! Error types and handling infrastructure for legacy data conversion

use anyhow::Error;
use std::fmt;
use std::path::PathBuf;

/// Ambient error kinds for the conversion pipeline
#[derive(Debug, thiserror::Error)]
pub enum ConversionErrorKind {
    #[error("input too large: {size} bytes (limit: {limit} bytes)")]
    InputTooLarge { size: usize, limit: usize },

    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
    },

    #[error("invalid configuration: {message}")]
    Configuration { message: String },

    #[error("conversion failed: {message}")]
    ConversionFailed { message: String },
}

impl ConversionErrorKind {
    pub fn io(message: String, path: Option<PathBuf>) -> Self {
        Self::Io { message, path }
    }

    pub fn configuration(message: String) -> Self {
        Self::Configuration { message }
    }
}

/// Main error type for conversion operations
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// Terminal per-record failure: the legacy data could not be converted.
    #[error(transparent)]
    DataConversion(#[from] DataConversionError),

    #[error("{kind}")]
    Conversion {
        kind: ConversionErrorKind,
        source: Option<anyhow::Error>,
    },

    #[error(transparent)]
    Other(Error),
}

impl ConversionError {
    pub fn conversion(kind: ConversionErrorKind) -> Self {
        Self::Conversion { kind, source: None }
    }

    pub fn conversion_with_source(kind: ConversionErrorKind, source: anyhow::Error) -> Self {
        Self::Conversion {
            kind,
            source: Some(source),
        }
    }

    pub fn other(error: Error) -> Self {
        Self::Other(error)
    }

    /// Create a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::DataConversion(err) => match err {
                DataConversionError::Corrupted(inner) => {
                    format!("corrupted legacy data: {}", inner)
                }
                DataConversionError::Encode(inner) => {
                    format!("JSON encoding error: {}", inner.message)
                }
            },
            Self::Conversion { kind, .. } => match kind {
                ConversionErrorKind::InputTooLarge { size, limit } => {
                    format!("record too large: {} bytes (limit: {} bytes)", size, limit)
                }
                ConversionErrorKind::Io { message, path } => match path {
                    Some(path) => format!("IO error on {}: {}", path.display(), message),
                    None => format!("IO error: {}", message),
                },
                _ => self.to_string(),
            },
            Self::Other(err) => {
                format!("unexpected error: {}", err)
            }
        }
    }
}

impl From<UnserializeError> for ConversionError {
    fn from(err: UnserializeError) -> Self {
        Self::DataConversion(DataConversionError::Corrupted(err))
    }
}

impl From<EncodeError> for ConversionError {
    fn from(err: EncodeError) -> Self {
        Self::DataConversion(DataConversionError::Encode(err))
    }
}

/// Terminal error for a single record whose legacy data cannot be converted.
///
/// Every decode failure (top-level payload, nested bundle attributes, nested
/// file-option value) is translated into `Corrupted` at the decode call site,
/// whichever collaborator produced it. No partial payload is ever returned
/// for a failed record, and nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum DataConversionError {
    #[error("unable to unserialize value: {0}")]
    Corrupted(#[from] UnserializeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Failure to decode a legacy-serialized string
#[derive(Debug, Clone)]
pub struct UnserializeError {
    pub message: String,
    pub offset: Option<usize>,
    pub input_preview: Option<String>,
}

impl UnserializeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            offset: None,
            input_preview: None,
        }
    }

    pub fn at(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_preview(mut self, preview: String) -> Self {
        self.input_preview = Some(preview);
        self
    }
}

impl fmt::Display for UnserializeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(offset) = self.offset {
            write!(f, " at offset {}", offset)?;
        }
        if let Some(preview) = &self.input_preview {
            write!(f, " (near {:?})", preview)?;
        }
        Ok(())
    }
}

impl std::error::Error for UnserializeError {}

/// Failure to encode a structured value as JSON
#[derive(Debug, Clone, thiserror::Error)]
#[error("unable to encode value as JSON: {message}")]
pub struct EncodeError {
    pub message: String,
}

impl EncodeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Convenience result type for legacy decoding operations
pub type UnserializeResult<T> = Result<T, UnserializeError>;
