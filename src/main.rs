//! Tetrogrid - Command-line tool for rendering integer cell grids to PNG

use std::process::ExitCode;

use tetrogrid::cli;

fn main() -> ExitCode {
    cli::run()
}
