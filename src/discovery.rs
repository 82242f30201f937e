//! Grid file discovery
//!
//! Solver runs write `{prefix}_{rows}x{cols}_grid_output.txt` for final grids
//! and `..._grid_output_intermediate.txt` for step-by-step sequences.

use glob::{glob, Pattern};
use std::path::{Path, PathBuf};

/// Suffix of final-grid files.
pub const GRID_SUFFIX: &str = "_grid_output.txt";

/// Suffix of step sequence files.
pub const SEQUENCE_SUFFIX: &str = "_grid_output_intermediate.txt";

fn find_with_suffix(dir: &Path, prefix: Option<&str>, suffix: &str) -> Vec<PathBuf> {
    let dir_str = Pattern::escape(&dir.display().to_string());
    let prefix = prefix.map(Pattern::escape).unwrap_or_else(|| "*".to_string());
    let pattern = format!("{}/{}_*x*{}", dir_str, prefix, suffix);

    let mut files: Vec<PathBuf> = match glob(&pattern) {
        Ok(paths) => paths.filter_map(Result::ok).filter(|p| p.is_file()).collect(),
        Err(_) => Vec::new(),
    };
    files.sort();
    files
}

/// Find final-grid files in `dir`, optionally limited to one run prefix.
///
/// Results are sorted by path.
pub fn find_grid_files(dir: &Path, prefix: Option<&str>) -> Vec<PathBuf> {
    find_with_suffix(dir, prefix, GRID_SUFFIX)
}

/// Find step sequence files in `dir`, optionally limited to one run prefix.
pub fn find_sequence_files(dir: &Path, prefix: Option<&str>) -> Vec<PathBuf> {
    find_with_suffix(dir, prefix, SEQUENCE_SUFFIX)
}
