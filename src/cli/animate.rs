//! Animate command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::config::CliOverrides;
use crate::gif::render_sequence_gif;
use crate::grid::parse_grid_sequence;

use super::{load_settings, read_input, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the animate command
pub fn run_animate(
    config_path: Option<&Path>,
    overrides: &CliOverrides,
    file: &Path,
    output: Option<&Path>,
) -> ExitCode {
    let config = match load_settings(config_path, overrides) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let content = match read_input(file) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let sequence = match parse_grid_sequence(&content) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}: {}", file.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let path = output.map(Path::to_path_buf).unwrap_or_else(|| file.with_extension("gif"));
    let options = config.render.to_options();

    match render_sequence_gif(
        &sequence,
        &options,
        config.animate.frame_ms,
        config.animate.loop_anim,
        &path,
    ) {
        Ok(frames) => {
            eprintln!("Wrote {} frame(s)", frames);
            println!("{}", path.display());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}: {}", file.display(), e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
