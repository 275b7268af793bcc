//! Configuration options for legacy data conversion

/// Policy for corrupted records during multi-record conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnCorrupted {
    /// Abort the whole batch on the first corrupted record
    Fail,
    /// Record the failure and continue with the remaining records
    Skip,
}

impl OnCorrupted {
    pub fn as_str(&self) -> &'static str {
        match self {
            OnCorrupted::Fail => "fail",
            OnCorrupted::Skip => "skip",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "fail" => Ok(OnCorrupted::Fail),
            "skip" => Ok(OnCorrupted::Skip),
            other => Err(format!(
                "Invalid corruption policy '{}'. Use 'fail' or 'skip'",
                other
            )),
        }
    }
}

/// Conversion configuration options
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Maximum size of a single serialized record in bytes
    pub max_input_size: usize,
    /// Maximum nesting depth accepted by the legacy decoder
    pub max_depth: usize,
    /// Pretty-print JSON output (vs compact)
    pub pretty: bool,
    /// What to do with corrupted records in batch conversion
    pub on_corrupted: OnCorrupted,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            max_input_size: 16 * 1024 * 1024, // 16MB, far above any real row
            max_depth: 128,
            pretty: false,
            on_corrupted: OnCorrupted::Fail,
        }
    }
}

impl ConversionConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration for unattended bulk migration: corrupted rows are
    /// reported and skipped instead of stopping the run
    pub fn bulk_migration() -> Self {
        Self {
            on_corrupted: OnCorrupted::Skip,
            ..Default::default()
        }
    }

    /// Set the maximum record size
    pub fn with_max_input_size(mut self, limit_bytes: usize) -> Self {
        self.max_input_size = limit_bytes;
        self
    }

    /// Set the decoder nesting depth limit
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Enable/disable pretty printing
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Set the corrupted-record policy
    pub fn with_on_corrupted(mut self, policy: OnCorrupted) -> Self {
        self.on_corrupted = policy;
        self
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.max_input_size < 64 {
            return Err("Maximum record size must be at least 64 bytes".to_string());
        }

        if self.max_depth == 0 {
            return Err("Maximum depth must be at least 1".to_string());
        }

        Ok(())
    }
}
