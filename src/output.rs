//! PNG output and file path generation

use image::RgbaImage;
use regex::Regex;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Error type for output operations
#[derive(Debug)]
pub enum OutputError {
    /// IO error during file operations
    Io(io::Error),
    /// Image encoding error
    Image(image::ImageError),
}

impl std::fmt::Display for OutputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputError::Io(e) => write!(f, "IO error: {}", e),
            OutputError::Image(e) => write!(f, "Image error: {}", e),
        }
    }
}

impl std::error::Error for OutputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OutputError::Io(e) => Some(e),
            OutputError::Image(e) => Some(e),
        }
    }
}

impl From<io::Error> for OutputError {
    fn from(e: io::Error) -> Self {
        OutputError::Io(e)
    }
}

impl From<image::ImageError> for OutputError {
    fn from(e: image::ImageError) -> Self {
        OutputError::Image(e)
    }
}

/// Create the parent directory of `path` if it is missing.
pub(crate) fn ensure_parent(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Save an RGBA image to a PNG file, creating parent directories.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), OutputError> {
    ensure_parent(path)?;
    image.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

/// Naming fields recovered from a solver output file name.
///
/// Recognizes `{prefix}_{rows}x{cols}_grid_output.txt` and the
/// `_grid_output_intermediate.txt` variant. The dimensions are only a label;
/// the parsed grid is authoritative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridFileName {
    pub prefix: String,
    pub rows: usize,
    pub cols: usize,
    pub intermediate: bool,
}

fn grid_file_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^(?P<prefix>.+)_(?P<rows>\d+)x(?P<cols>\d+)_grid_output(?P<intermediate>_intermediate)?\.txt$",
        )
        .expect("grid file name pattern is valid")
    })
}

impl GridFileName {
    /// Parse the file name component of `path`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tetrogrid::output::GridFileName;
    /// use std::path::Path;
    ///
    /// let name = GridFileName::parse(Path::new("output/ab12_10x20_grid_output.txt")).unwrap();
    /// assert_eq!((name.prefix.as_str(), name.rows, name.cols), ("ab12", 10, 20));
    /// assert!(!name.intermediate);
    /// ```
    pub fn parse(path: &Path) -> Option<Self> {
        let file_name = path.file_name()?.to_str()?;
        let caps = grid_file_regex().captures(file_name)?;
        Some(Self {
            prefix: caps["prefix"].to_string(),
            rows: caps["rows"].parse().ok()?,
            cols: caps["cols"].parse().ok()?,
            intermediate: caps.name("intermediate").is_some(),
        })
    }

    /// Warning text when the labeled size differs from the parsed grid.
    pub fn mismatch(&self, rows: usize, cols: usize) -> Option<String> {
        if self.rows == rows && self.cols == cols {
            return None;
        }
        Some(format!(
            "file name says {}x{} but grid is {}x{}; using the grid",
            self.rows, self.cols, rows, cols
        ))
    }
}

fn stem_and_dir<'a>(input: &'a Path, out_dir: Option<&'a Path>) -> (String, &'a Path) {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("grid").to_string();
    let dir = out_dir.unwrap_or_else(|| input.parent().unwrap_or(Path::new("")));
    (stem, dir)
}

/// Output path for a single-grid file: `{dir}/{stem}.png`.
///
/// `dir` is `out_dir` when given, else the input's directory.
pub fn png_path_for(input: &Path, out_dir: Option<&Path>) -> PathBuf {
    let (stem, dir) = stem_and_dir(input, out_dir);
    dir.join(format!("{}.png", stem))
}

/// Output path for one step of a sequence file: `{dir}/{stem}_step_{step}.png`.
pub fn step_png_path(input: &Path, out_dir: Option<&Path>, step: usize) -> PathBuf {
    let (stem, dir) = stem_and_dir(input, out_dir);
    dir.join(format!("{}_step_{}.png", stem, step))
}
