//! Discovery of serialized record files

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Check whether a path is a record file with the wanted extension
fn has_extension(path: &Path, extension: &str) -> bool {
    path.is_file() && path.extension().map_or(false, |ext| ext == extension)
}

/// Find record files in a directory. If recursive is true, walk the whole
/// tree; otherwise list only the directory itself.
pub fn find_record_files(
    dir: &Path,
    extension: &str,
    recursive: bool,
) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut files = Vec::new();

    if recursive {
        for entry in WalkDir::new(dir) {
            let entry = entry?;
            if has_extension(entry.path(), extension) {
                files.push(entry.path().to_path_buf());
            }
        }
    } else {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if has_extension(&path, extension) {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}
