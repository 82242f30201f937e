//! View command implementation

use std::io;
use std::path::Path;
use std::process::ExitCode;

use crate::config::CliOverrides;
use crate::grid::parse_grid_sequence;
use crate::viewer::{input_cache_dir, pregenerate_images, Viewer};

use super::{load_settings, read_input, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the view command
pub fn run_view(
    config_path: Option<&Path>,
    overrides: &CliOverrides,
    file: &Path,
    refresh: bool,
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

    let cache_dir = input_cache_dir(&config.viewer.cache_dir, file);
    let images =
        match pregenerate_images(&sequence, &cache_dir, &config.render.to_options(), refresh) {
            Ok(paths) => paths,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        };
    eprintln!(
        "Loaded {} step(s) from {}; images in {}",
        sequence.len(),
        file.display(),
        cache_dir.display()
    );

    let use_color = atty::is(atty::Stream::Stdout);
    let mut viewer = Viewer::new(&sequence, images)
        .with_increment(config.viewer.step_increment)
        .with_preview(config.viewer.preview, use_color);

    let stdin = io::stdin();
    let stdout = io::stdout();
    match viewer.run(stdin.lock(), stdout.lock()) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
