//! Interactive step-through viewer for grid sequences
//!
//! Every step is rendered once into a per-input cache directory as
//! `grid_step_{i}.png`. A `cache.key` file beside the images records a
//! fingerprint of the grids and render options; images are reused only while
//! it matches. The session reads one command per line and prints the current
//! step after each move.

use crate::grid::GridSequence;
use crate::output::{save_png, OutputError};
use crate::renderer::{render_grid, RenderError, RenderOptions};
use crate::stepper::StepState;
use crate::terminal::render_preview;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fingerprint file written next to cached step images.
pub const CACHE_KEY_FILE: &str = "cache.key";

/// Error type for image pre-generation.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("step {step}: {source}")]
    Render { step: usize, source: RenderError },
    #[error("{}: {source}", path.display())]
    Output { path: PathBuf, source: OutputError },
}

/// Cache directory for one input file: `{cache_dir}/{input stem}`.
pub fn input_cache_dir(cache_dir: &Path, input: &Path) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("grid");
    cache_dir.join(stem)
}

/// Cached image path for a step.
pub fn step_image_path(cache_dir: &Path, step: usize) -> PathBuf {
    cache_dir.join(format!("grid_step_{}.png", step))
}

/// FNV-1a over the grids and the options that affect pixels.
fn cache_key(sequence: &GridSequence, options: &RenderOptions) -> String {
    const FNV_OFFSET: u64 = 0xcbf29ce484222325;
    const FNV_PRIME: u64 = 0x100000001b3;

    let data = format!("{:?}\n{}", options, sequence);
    let hash = data.bytes().fold(FNV_OFFSET, |hash, byte| {
        (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
    });
    format!("{:016x}", hash)
}

/// Render each step into `cache_dir`, reusing images that already exist.
///
/// Everything is re-rendered when `refresh` is set or when the stored
/// `cache.key` differs from the current grids and options. Returns one path
/// per step.
pub fn pregenerate_images(
    sequence: &GridSequence,
    cache_dir: &Path,
    options: &RenderOptions,
    refresh: bool,
) -> Result<Vec<PathBuf>, ViewerError> {
    let key = cache_key(sequence, options);
    let key_path = cache_dir.join(CACHE_KEY_FILE);
    let stale =
        refresh || !fs::read_to_string(&key_path).is_ok_and(|stored| stored.trim() == key);

    let mut paths = Vec::with_capacity(sequence.len());
    for (step, grid) in sequence.iter().enumerate() {
        let path = step_image_path(cache_dir, step);
        if stale || !path.exists() {
            let image =
                render_grid(grid, options).map_err(|source| ViewerError::Render { step, source })?;
            save_png(&image, &path)
                .map_err(|source| ViewerError::Output { path: path.clone(), source })?;
        }
        paths.push(path);
    }

    if stale {
        fs::write(&key_path, &key).map_err(|e| ViewerError::Output {
            path: key_path.clone(),
            source: OutputError::Io(e),
        })?;
    }
    Ok(paths)
}

/// A parsed viewer command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerCommand {
    /// Forward by the given count, or by the current increment
    Next(Option<usize>),
    /// Back by the given count, or by the current increment
    Previous(Option<usize>),
    /// Change the step increment
    SetIncrement(usize),
    /// Jump to a 1-based step
    Goto(usize),
    First,
    Last,
    Help,
    Quit,
}

/// Error for input lines that are not commands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}' (type 'help')")]
    Unknown(String),
    #[error("'{command}' needs a positive number, got '{arg}'")]
    BadNumber { command: String, arg: String },
    #[error("'{0}' needs a number")]
    MissingNumber(String),
}

fn parse_count(command: &str, arg: &str) -> Result<usize, CommandError> {
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CommandError::BadNumber { command: command.to_string(), arg: arg.to_string() }),
    }
}

/// Parse one input line.
///
/// An empty line means "next".
///
/// # Examples
///
/// ```
/// use tetrogrid::viewer::{parse_command, ViewerCommand};
///
/// assert_eq!(parse_command("").unwrap(), ViewerCommand::Next(None));
/// assert_eq!(parse_command("p 5").unwrap(), ViewerCommand::Previous(Some(5)));
/// assert_eq!(parse_command("goto 3").unwrap(), ViewerCommand::Goto(3));
/// ```
pub fn parse_command(line: &str) -> Result<ViewerCommand, CommandError> {
    let mut parts = line.split_whitespace();
    let Some(command) = parts.next() else {
        return Ok(ViewerCommand::Next(None));
    };
    let arg = parts.next();
    let command_lc = command.to_ascii_lowercase();

    let optional_count = |arg: Option<&str>| arg.map(|a| parse_count(command, a)).transpose();
    let required_count = |arg: Option<&str>| {
        arg.ok_or_else(|| CommandError::MissingNumber(command.to_string()))
            .and_then(|a| parse_count(command, a))
    };

    match command_lc.as_str() {
        "n" | "next" => Ok(ViewerCommand::Next(optional_count(arg)?)),
        "p" | "prev" | "previous" => Ok(ViewerCommand::Previous(optional_count(arg)?)),
        "i" | "inc" | "increment" => Ok(ViewerCommand::SetIncrement(required_count(arg)?)),
        "g" | "goto" => Ok(ViewerCommand::Goto(required_count(arg)?)),
        "first" => Ok(ViewerCommand::First),
        "last" => Ok(ViewerCommand::Last),
        "h" | "help" | "?" => Ok(ViewerCommand::Help),
        "q" | "quit" | "exit" => Ok(ViewerCommand::Quit),
        _ => Err(CommandError::Unknown(command.to_string())),
    }
}

const HELP: &str = "\
Commands:
  n, next [k]        forward k steps (default: increment)
  p, prev [k]        back k steps (default: increment)
  i, increment k     set the step increment
  g, goto k          jump to step k (1-based)
  first, last        jump to the first or last step
  h, help            show this help
  q, quit            leave the viewer
An empty line moves forward.";

/// Viewer session state.
#[derive(Debug)]
pub struct Viewer<'a> {
    sequence: &'a GridSequence,
    images: Vec<PathBuf>,
    state: StepState,
    increment: usize,
    preview: bool,
    use_color: bool,
}

impl<'a> Viewer<'a> {
    /// `images` holds one cached image path per step.
    pub fn new(sequence: &'a GridSequence, images: Vec<PathBuf>) -> Self {
        Self {
            sequence,
            images,
            state: StepState::new(sequence.len()),
            increment: 1,
            preview: true,
            use_color: false,
        }
    }

    pub fn with_increment(mut self, increment: usize) -> Self {
        self.increment = increment.max(1);
        self
    }

    /// Enable the terminal preview, with or without ANSI colors.
    pub fn with_preview(mut self, preview: bool, use_color: bool) -> Self {
        self.preview = preview;
        self.use_color = use_color;
        self
    }

    pub fn state(&self) -> StepState {
        self.state
    }

    pub fn increment(&self) -> usize {
        self.increment
    }

    /// Apply a command. Returns `false` when the session should end.
    pub fn apply(&mut self, command: ViewerCommand) -> bool {
        match command {
            ViewerCommand::Next(n) => {
                self.state.next(n.unwrap_or(self.increment));
            }
            ViewerCommand::Previous(n) => {
                self.state.previous(n.unwrap_or(self.increment));
            }
            ViewerCommand::SetIncrement(n) => self.increment = n.max(1),
            ViewerCommand::Goto(step) => {
                self.state.goto(step.saturating_sub(1));
            }
            ViewerCommand::First => {
                self.state.first();
            }
            ViewerCommand::Last => {
                self.state.last();
            }
            ViewerCommand::Help => {}
            ViewerCommand::Quit => return false,
        }
        true
    }

    /// Text shown for the current step.
    pub fn frame(&self) -> String {
        let step = self.state.current();
        let mut out = format!(
            "Step {}/{} (increment {})\n",
            step + 1,
            self.state.total(),
            self.increment
        );
        if let Some(path) = self.images.get(step) {
            out.push_str(&format!("Image: {}\n", path.display()));
        }
        if self.preview {
            if let Some(grid) = self.sequence.get(step) {
                out.push_str(&render_preview(grid, self.use_color));
            }
        }
        out
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        write!(output, "{}", self.frame())?;
        write!(output, "> ")?;
        output.flush()?;

        for line in input.lines() {
            let line = line?;
            match parse_command(&line) {
                Ok(ViewerCommand::Help) => writeln!(output, "{}", HELP)?,
                Ok(command) => {
                    if !self.apply(command) {
                        break;
                    }
                    write!(output, "{}", self.frame())?;
                }
                Err(e) => writeln!(output, "Error: {}", e)?,
            }
            write!(output, "> ")?;
            output.flush()?;
        }
        writeln!(output)?;
        Ok(())
    }
}
