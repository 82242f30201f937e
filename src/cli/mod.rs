//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod animate;
mod edges;
mod render;
mod view;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::{load_with_overrides, CliOverrides, TgridConfig};
use crate::renderer::RenderStyle;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Tetrogrid - render integer cell grids as outlined regions
#[derive(Parser)]
#[command(name = "tgrid")]
#[command(about = "Tetrogrid - render integer cell grids (tetromino packings) to PNG")]
#[command(version)]
pub struct Cli {
    /// Config file (default: tgrid.toml in this or a parent directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Rendering flags shared by commands that write images
#[derive(clap::Args, Debug, Default)]
pub struct RenderArgs {
    /// Drawing style
    #[arg(long, value_enum)]
    pub style: Option<RenderStyle>,

    /// Cell size in pixels
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=1024))]
    pub cell_size: Option<u32>,

    /// Edge thickness in pixels
    #[arg(long)]
    pub line_width: Option<u32>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert grid files to PNG
    Render {
        /// Grid files to convert. If omitted, searches --dir for
        /// {prefix}_{R}x{C}_grid_output.txt files
        files: Vec<PathBuf>,

        /// Directory searched when no files are given
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Only files whose name starts with this run prefix
        #[arg(short, long)]
        prefix: Option<String>,

        /// Output directory (default: next to each input)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Treat every file as a blank-line separated sequence of steps
        #[arg(long)]
        sequence: bool,

        /// Parallel jobs (0 = all cores)
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Print one JSON object per progress event
        #[arg(long)]
        json: bool,

        /// Show each file as it starts
        #[arg(short, long)]
        verbose: bool,

        #[command(flatten)]
        render: RenderArgs,
    },
    /// Step through a grid sequence interactively
    View {
        /// Sequence file (blank-line separated grids)
        file: PathBuf,

        /// Directory for cached step images
        #[arg(long)]
        cache_dir: Option<PathBuf>,

        /// Steps moved by next/previous
        #[arg(short, long)]
        increment: Option<usize>,

        /// Do not print the terminal preview
        #[arg(long)]
        no_preview: bool,

        /// Re-render cached images even if they exist
        #[arg(long)]
        refresh: bool,

        #[command(flatten)]
        render: RenderArgs,
    },
    /// Print the boundary edges of each foreground cell
    Edges {
        /// Grid or sequence file
        file: PathBuf,

        /// Step of a sequence file (1-based, default: 1)
        #[arg(short, long, default_value = "1")]
        step: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export a grid sequence as an animated GIF
    Animate {
        /// Sequence file (blank-line separated grids)
        file: PathBuf,

        /// Output GIF path (default: {input}.gif)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Delay per frame in milliseconds
        #[arg(long)]
        frame_ms: Option<u32>,

        /// Play once instead of looping
        #[arg(long)]
        no_loop: bool,

        #[command(flatten)]
        render: RenderArgs,
    },
}

impl RenderArgs {
    fn apply(&self, overrides: &mut CliOverrides) {
        overrides.style = self.style;
        overrides.cell_size = self.cell_size;
        overrides.line_width = self.line_width;
    }
}

/// Load tgrid.toml with CLI overrides, printing the error on failure.
pub(crate) fn load_settings(
    config_path: Option<&Path>,
    overrides: &CliOverrides,
) -> Result<TgridConfig, ExitCode> {
    load_with_overrides(config_path, overrides).map_err(|e| {
        eprintln!("Error: {}", e);
        ExitCode::from(EXIT_INVALID_ARGS)
    })
}

/// Read an input file, printing the error on failure.
pub(crate) fn read_input(path: &Path) -> Result<String, ExitCode> {
    std::fs::read_to_string(path).map_err(|e| {
        eprintln!("Error: Cannot open input file '{}': {}", path.display(), e);
        ExitCode::from(EXIT_INVALID_ARGS)
    })
}

/// Parse arguments and run the selected command.
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Render { files, dir, prefix, out, sequence, jobs, json, verbose, render } => {
            let mut overrides = CliOverrides { dir, out, jobs, ..CliOverrides::default() };
            render.apply(&mut overrides);
            render::run_render(
                config,
                &overrides,
                &files,
                prefix.as_deref(),
                sequence,
                json,
                verbose,
            )
        }
        Commands::View { file, cache_dir, increment, no_preview, refresh, render } => {
            let mut overrides = CliOverrides {
                cache_dir,
                step_increment: increment,
                preview: no_preview.then_some(false),
                ..CliOverrides::default()
            };
            render.apply(&mut overrides);
            view::run_view(config, &overrides, &file, refresh)
        }
        Commands::Edges { file, step, json } => edges::run_edges(&file, step, json),
        Commands::Animate { file, output, frame_ms, no_loop, render } => {
            let mut overrides = CliOverrides {
                frame_ms,
                loop_anim: no_loop.then_some(false),
                ..CliOverrides::default()
            };
            render.apply(&mut overrides);
            animate::run_animate(config, &overrides, &file, output.as_deref())
        }
    }
}
