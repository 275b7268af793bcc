//! Input-to-output path mapping for directory conversion

use std::path::{Path, PathBuf};

/// Map a record file into its JSON output path, preserving the directory
/// structure relative to `input_dir`.
pub fn map_input_to_output(input_dir: &Path, input_file: &Path, output_dir: &Path) -> PathBuf {
    let relative = input_file.strip_prefix(input_dir).unwrap_or(input_file);
    let mut out = output_dir.join(relative);
    out.set_extension("json");
    out
}
