//! Render command implementation (batch conversion)

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::batch::{Batch, BatchJob, InputMode};
use crate::config::CliOverrides;
use crate::discovery::{find_grid_files, find_sequence_files};
use crate::progress::{ConsoleProgress, JsonProgress, ProgressReporter};

use super::{load_settings, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the render command
pub fn run_render(
    config_path: Option<&Path>,
    overrides: &CliOverrides,
    files: &[PathBuf],
    prefix: Option<&str>,
    sequence: bool,
    json: bool,
    verbose: bool,
) -> ExitCode {
    let config = match load_settings(config_path, overrides) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let jobs: Vec<BatchJob> = if files.is_empty() {
        let dir = &config.batch.dir;
        if !dir.is_dir() {
            eprintln!("Error: Directory '{}' does not exist", dir.display());
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
        let mode = if sequence { InputMode::Sequence } else { InputMode::Single };
        let mut found: Vec<BatchJob> =
            find_grid_files(dir, prefix).into_iter().map(|p| BatchJob::new(p, mode)).collect();
        found.extend(find_sequence_files(dir, prefix).into_iter().map(BatchJob::detect));
        found
    } else if sequence {
        files.iter().map(|p| BatchJob::new(p, InputMode::Sequence)).collect()
    } else {
        files.iter().map(BatchJob::detect).collect()
    };

    if jobs.is_empty() {
        match prefix {
            Some(p) => eprintln!(
                "Error: No grid files with prefix '{}' found in '{}'",
                p,
                config.batch.dir.display()
            ),
            None => eprintln!("Error: No grid files found in '{}'", config.batch.dir.display()),
        }
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let reporter: Box<dyn ProgressReporter> = if json {
        Box::new(JsonProgress::new())
    } else {
        Box::new(ConsoleProgress::new().with_verbose(verbose))
    };

    let batch = Batch::new(config.render.to_options())
        .with_out_dir(config.batch.out.clone())
        .with_jobs(config.batch.jobs);
    let result = batch.run(&jobs, reporter.as_ref());

    if !json {
        for path in result.images() {
            println!("{}", path.display());
        }
    }

    if result.is_success() {
        ExitCode::from(EXIT_SUCCESS)
    } else {
        ExitCode::from(EXIT_ERROR)
    }
}
