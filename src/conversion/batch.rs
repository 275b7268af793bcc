//! Batch conversion of line-delimited record streams
//!
//! One serialized record per line, blank lines ignored. The continuation
//! policy for corrupted records lives here, not in the single-record
//! converter: a migration driver decides whether one bad row stops the run.

use crate::conversion::config::OnCorrupted;
use crate::conversion::engine::{SerializedDataConverter, EMPTY_PAYLOAD};
use crate::conversion::stats::MigrationStatistics;
use crate::error::{ConversionError, ConversionErrorKind, ConversionResult};
use crate::formatter::JsonSerializer;
use crate::parser::Unserializer;
use std::time::Instant;

/// What happened to a single record in the batch
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    /// Record converted (or passed through as already converted)
    Converted(String),
    /// Record was corrupted and skipped under the skip policy
    Skipped { error: String },
}

/// One record's position and outcome
#[derive(Debug, Clone, PartialEq)]
pub struct RecordResult {
    /// 1-based line number in the input stream
    pub line: usize,
    pub outcome: RecordOutcome,
}

/// Outcomes plus run statistics for a whole batch
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub records: Vec<RecordResult>,
    pub stats: MigrationStatistics,
}

impl BatchReport {
    /// Iterate the successfully converted JSON lines
    pub fn converted_lines(&self) -> impl Iterator<Item = &str> {
        self.records.iter().filter_map(|r| match &r.outcome {
            RecordOutcome::Converted(json) => Some(json.as_str()),
            RecordOutcome::Skipped { .. } => None,
        })
    }
}

/// Convert a stream of line records with the converter's corruption policy.
///
/// Under `OnCorrupted::Fail` the first corrupted record aborts the batch
/// with its line number; under `OnCorrupted::Skip` it is recorded and the
/// batch continues. Non-record errors (IO, limits) always abort.
pub fn convert_lines<U, J, I>(
    converter: &SerializedDataConverter<U, J>,
    lines: I,
) -> ConversionResult<BatchReport>
where
    U: Unserializer,
    J: JsonSerializer,
    I: IntoIterator<Item = String>,
{
    let started = Instant::now();
    let mut records = Vec::new();
    let mut stats = MigrationStatistics::new();

    for (index, line) in lines.into_iter().enumerate() {
        let line_no = index + 1;
        let record = line.trim();
        if record.is_empty() {
            continue;
        }

        stats.records_total += 1;
        stats.input_bytes += record.len() as u64;

        match converter.convert(record) {
            Ok(json) => {
                if record == EMPTY_PAYLOAD {
                    stats.already_converted += 1;
                } else {
                    stats.converted += 1;
                }
                stats.output_bytes += json.len() as u64;
                records.push(RecordResult {
                    line: line_no,
                    outcome: RecordOutcome::Converted(json),
                });
            }
            Err(ConversionError::DataConversion(err)) => match converter.config().on_corrupted {
                OnCorrupted::Skip => {
                    stats.corrupted_skipped += 1;
                    records.push(RecordResult {
                        line: line_no,
                        outcome: RecordOutcome::Skipped {
                            error: err.to_string(),
                        },
                    });
                }
                OnCorrupted::Fail => {
                    return Err(ConversionError::conversion_with_source(
                        ConversionErrorKind::ConversionFailed {
                            message: format!("record at line {}: {}", line_no, err),
                        },
                        err.into(),
                    ));
                }
            },
            Err(other) => return Err(other),
        }
    }

    stats.finish(started.elapsed());
    Ok(BatchReport { records, stats })
}
