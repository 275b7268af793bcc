//! JSON output encoding

use crate::error::EncodeError;
use serde_json::Value;

/// Capability to encode a structured value as JSON text.
///
/// The converter only ever encodes finite, acyclic values it produced or
/// received from a successful decode, so failures indicate a collaborator
/// fault rather than bad input data.
pub trait JsonSerializer {
    fn serialize(&self, value: &Value) -> Result<String, EncodeError>;
}

/// serde_json-backed encoder
#[derive(Debug, Clone, Default)]
pub struct JsonEncoder {
    pretty: bool,
}

impl JsonEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretty-print output instead of the compact default
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl JsonSerializer for JsonEncoder {
    fn serialize(&self, value: &Value) -> Result<String, EncodeError> {
        let encoded = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        encoded.map_err(|e| EncodeError::new(e.to_string()))
    }
}
