//! Statistics for multi-record migration runs

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Counters collected while converting a stream of records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationStatistics {
    /// Records seen, excluding blank lines
    pub records_total: usize,
    /// Records decoded and rewritten to JSON
    pub converted: usize,
    /// Records that already carried the empty-payload marker
    pub already_converted: usize,
    /// Corrupted records skipped under the skip policy
    pub corrupted_skipped: usize,
    /// Total serialized input bytes
    pub input_bytes: u64,
    /// Total JSON output bytes
    pub output_bytes: u64,
    /// Wall-clock time for the run in milliseconds
    pub elapsed_ms: u64,
    /// When the statistics were collected
    pub collected_at: chrono::DateTime<chrono::Utc>,
}

impl Default for MigrationStatistics {
    fn default() -> Self {
        Self {
            records_total: 0,
            converted: 0,
            already_converted: 0,
            corrupted_skipped: 0,
            input_bytes: 0,
            output_bytes: 0,
            elapsed_ms: 0,
            collected_at: chrono::Utc::now(),
        }
    }
}

impl MigrationStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finalize the run: stamp elapsed time and collection timestamp
    pub fn finish(&mut self, elapsed: Duration) {
        self.elapsed_ms = elapsed.as_millis() as u64;
        self.collected_at = chrono::Utc::now();
    }

    /// Throughput in records per second
    pub fn records_per_sec(&self) -> f64 {
        if self.elapsed_ms == 0 {
            return 0.0;
        }
        self.records_total as f64 / (self.elapsed_ms as f64 / 1000.0)
    }

    /// Get a formatted one-line summary
    pub fn summary(&self) -> String {
        format!(
            "{} records in {:.1}s - {} converted, {} already converted, {} corrupted",
            self.records_total,
            self.elapsed_ms as f64 / 1000.0,
            self.converted,
            self.already_converted,
            self.corrupted_skipped
        )
    }

    /// Export to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
