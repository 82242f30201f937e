//! Batch conversion of grid files to PNG.
//!
//! Every file is rendered independently: a malformed or unreadable file is
//! recorded as a failed [`FileOutcome`] and the remaining files still render.
//! Files are processed in parallel on a rayon pool.
//!
//! ```ignore
//! use tetrogrid::batch::{Batch, BatchJob};
//! use tetrogrid::progress::ConsoleProgress;
//!
//! let jobs = vec![BatchJob::detect("output/run_8x8_grid_output.txt")];
//! let batch = Batch::new(RenderOptions::default()).with_jobs(4);
//! let result = batch.run(&jobs, &ConsoleProgress::new());
//! println!("{} ok, {} failed", result.succeeded(), result.failed());
//! ```

use crate::grid::{parse_grid, parse_grid_sequence, Grid, GridSequence, MalformedGridError};
use crate::output::{png_path_for, save_png, step_png_path, GridFileName, OutputError};
use crate::progress::{FileStatus, ProgressEvent, ProgressReporter};
use crate::renderer::{render_grid, RenderError, RenderOptions};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;

/// How a file's text is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// All rows form one grid; one PNG
    Single,
    /// Blank-line separated steps; one PNG per step
    Sequence,
}

/// One file to convert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchJob {
    pub input: PathBuf,
    pub mode: InputMode,
}

impl BatchJob {
    pub fn new(input: impl Into<PathBuf>, mode: InputMode) -> Self {
        Self { input: input.into(), mode }
    }

    /// Sequence mode for `_intermediate` solver files, single mode otherwise.
    pub fn detect(input: impl Into<PathBuf>) -> Self {
        let input = input.into();
        let mode = match GridFileName::parse(&input) {
            Some(name) if name.intermediate => InputMode::Sequence,
            _ => InputMode::Single,
        };
        Self { input, mode }
    }
}

/// Why a single file failed.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("cannot read {}: {source}", path.display())]
    Read { path: PathBuf, source: std::io::Error },
    #[error("malformed grid: {0}")]
    Malformed(#[from] MalformedGridError),
    #[error("step {step}: {source}")]
    Render { step: usize, source: RenderError },
    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Result of converting one file.
#[derive(Debug)]
pub struct FileOutcome {
    pub input: PathBuf,
    /// Written image paths, or the error that stopped this file
    pub result: Result<Vec<PathBuf>, FileError>,
    pub warnings: Vec<String>,
    pub duration: Duration,
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Result of a whole batch run.
#[derive(Debug, Default)]
pub struct BatchResult {
    /// Outcomes in job order
    pub outcomes: Vec<FileOutcome>,
    pub total_duration: Duration,
}

impl BatchResult {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// All image paths written across the batch.
    pub fn images(&self) -> impl Iterator<Item = &Path> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok())
            .flat_map(|paths| paths.iter().map(PathBuf::as_path))
    }
}

/// Default number of parallel jobs (uses available parallelism).
fn default_jobs() -> usize {
    std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
}

/// Batch converter.
#[derive(Debug, Clone)]
pub struct Batch {
    options: RenderOptions,
    out_dir: Option<PathBuf>,
    jobs: usize,
}

impl Batch {
    pub fn new(options: RenderOptions) -> Self {
        Self { options, out_dir: None, jobs: default_jobs() }
    }

    /// Write PNGs into `dir` instead of next to each input.
    pub fn with_out_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.out_dir = dir;
        self
    }

    /// Set the number of parallel workers; 0 means all available cores.
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = if jobs == 0 { default_jobs() } else { jobs };
        self
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// Convert every job, reporting progress as files finish.
    pub fn run(&self, jobs: &[BatchJob], reporter: &dyn ProgressReporter) -> BatchResult {
        let start = Instant::now();
        reporter.report(ProgressEvent::BatchStarted { total_files: jobs.len() });

        let convert = |job: &BatchJob| self.convert_reported(job, reporter);
        let pool = rayon::ThreadPoolBuilder::new().num_threads(self.jobs).build();
        let outcomes: Vec<FileOutcome> = match pool {
            Ok(pool) => pool.install(|| jobs.par_iter().map(convert).collect()),
            Err(e) => {
                reporter.report(ProgressEvent::Warning {
                    file: None,
                    message: format!("thread pool unavailable ({}), rendering sequentially", e),
                });
                jobs.iter().map(convert).collect()
            }
        };

        let result = BatchResult { outcomes, total_duration: start.elapsed() };
        reporter.report(ProgressEvent::BatchCompleted {
            succeeded: result.succeeded(),
            failed: result.failed(),
            duration_ms: result.total_duration.as_millis() as u64,
        });
        result
    }

    fn convert_reported(&self, job: &BatchJob, reporter: &dyn ProgressReporter) -> FileOutcome {
        let file = job.input.display().to_string();
        if reporter.is_verbose() {
            reporter.report(ProgressEvent::FileStarted { file: file.clone() });
        }

        let start = Instant::now();
        let mut warnings = Vec::new();
        let result = self.convert(job, &mut warnings);
        let duration = start.elapsed();

        for message in &warnings {
            reporter.report(ProgressEvent::Warning {
                file: Some(file.clone()),
                message: message.clone(),
            });
        }
        let (status, images) = match &result {
            Ok(paths) => (FileStatus::Success, paths.len()),
            Err(e) => (FileStatus::Failed(e.to_string()), 0),
        };
        reporter.report(ProgressEvent::FileCompleted {
            file,
            status,
            images,
            duration_ms: duration.as_millis() as u64,
        });

        FileOutcome { input: job.input.clone(), result, warnings, duration }
    }

    /// Convert one file without progress reporting.
    pub fn convert(
        &self,
        job: &BatchJob,
        warnings: &mut Vec<String>,
    ) -> Result<Vec<PathBuf>, FileError> {
        let text = std::fs::read_to_string(&job.input)
            .map_err(|source| FileError::Read { path: job.input.clone(), source })?;
        let out_dir = self.out_dir.as_deref();

        match job.mode {
            InputMode::Single => {
                let grid = parse_grid(&text)?;
                check_file_name(&job.input, &grid, warnings);
                let path = png_path_for(&job.input, out_dir);
                self.render_to(&grid, 0, &path)?;
                Ok(vec![path])
            }
            InputMode::Sequence => {
                let sequence: GridSequence = parse_grid_sequence(&text)?;
                if let Some(last) = sequence.iter().last() {
                    check_file_name(&job.input, last, warnings);
                }
                sequence
                    .iter()
                    .enumerate()
                    .map(|(step, grid)| {
                        let path = step_png_path(&job.input, out_dir, step);
                        self.render_to(grid, step, &path).map(|()| path)
                    })
                    .collect()
            }
        }
    }

    fn render_to(&self, grid: &Grid, step: usize, path: &Path) -> Result<(), FileError> {
        let image =
            render_grid(grid, &self.options).map_err(|source| FileError::Render { step, source })?;
        save_png(&image, path)?;
        Ok(())
    }
}

/// Warn when the `RxC` in a solver file name disagrees with the parsed grid.
fn check_file_name(input: &Path, grid: &Grid, warnings: &mut Vec<String>) {
    if let Some(message) =
        GridFileName::parse(input).and_then(|name| name.mismatch(grid.rows(), grid.cols()))
    {
        warnings.push(message);
    }
}
