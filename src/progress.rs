//! Batch progress reporting.
//!
//! Batch runs emit [`ProgressEvent`]s to a [`ProgressReporter`]. The console
//! reporter prints one line per file to stderr; the JSON reporter prints one
//! JSON object per line for scripts.
//!
//! ```
//! use tetrogrid::progress::{ConsoleProgress, ProgressEvent, ProgressReporter};
//!
//! let reporter = ConsoleProgress::with_output(std::io::sink());
//! reporter.report(ProgressEvent::BatchStarted { total_files: 3 });
//! ```

use serde::Serialize;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Status of one file in progress events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "error", rename_all = "lowercase")]
pub enum FileStatus {
    /// All outputs were written
    Success,
    /// The file could not be rendered
    Failed(String),
}

impl std::fmt::Display for FileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileStatus::Success => write!(f, "success"),
            FileStatus::Failed(e) => write!(f, "failed: {}", e),
        }
    }
}

/// Events reported during a batch run.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ProgressEvent {
    BatchStarted {
        total_files: usize,
    },
    FileStarted {
        file: String,
    },
    FileCompleted {
        file: String,
        #[serde(flatten)]
        status: FileStatus,
        /// Number of images written
        images: usize,
        duration_ms: u64,
    },
    BatchCompleted {
        succeeded: usize,
        failed: usize,
        duration_ms: u64,
    },
    Warning {
        #[serde(skip_serializing_if = "Option::is_none")]
        file: Option<String>,
        message: String,
    },
}

/// Receives batch progress events. Shared across worker threads.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, event: ProgressEvent);

    /// Whether to receive `FileStarted` events. Batches skip them otherwise.
    fn is_verbose(&self) -> bool {
        false
    }
}

/// Reporter that drops every event.
#[derive(Debug, Default)]
pub struct NullProgress;

impl ProgressReporter for NullProgress {
    fn report(&self, _event: ProgressEvent) {}
}

/// Line-oriented writer shared by the reporters.
struct Sink(Mutex<Box<dyn Write + Send>>);

impl Sink {
    fn new<W: Write + Send + 'static>(output: W) -> Self {
        Sink(Mutex::new(Box::new(output)))
    }

    fn line(&self, text: &str) {
        if let Ok(mut out) = self.0.lock() {
            let _ = writeln!(out, "{}", text);
        }
    }
}

impl std::fmt::Debug for Sink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Sink")
    }
}

#[derive(Debug, Clone, Copy)]
enum Tone {
    Label,
    Good,
    Warn,
    Bad,
}

impl Tone {
    fn ansi(self) -> &'static str {
        match self {
            Tone::Label => "\x1b[36m",
            Tone::Good => "\x1b[32m",
            Tone::Warn => "\x1b[33m",
            Tone::Bad => "\x1b[31m",
        }
    }
}

/// Human-readable progress on stderr.
///
/// Colors are on when stderr is a terminal. Files are numbered in the order
/// they finish, which differs from job order when running in parallel.
#[derive(Debug)]
pub struct ConsoleProgress {
    sink: Sink,
    colors: bool,
    verbose: bool,
    finished: AtomicUsize,
    total: AtomicUsize,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self::with_output(std::io::stderr()).with_colors(atty::is(atty::Stream::Stderr))
    }

    /// Write to `output` instead of stderr, without colors.
    pub fn with_output<W: Write + Send + 'static>(output: W) -> Self {
        Self {
            sink: Sink::new(output),
            colors: false,
            verbose: false,
            finished: AtomicUsize::new(0),
            total: AtomicUsize::new(0),
        }
    }

    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn paint(&self, tone: Tone, text: &str) -> String {
        if self.colors {
            format!("{}{}\x1b[0m", tone.ansi(), text)
        } else {
            text.to_string()
        }
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{} {}", n, word)
    } else {
        format!("{} {}s", n, word)
    }
}

impl ProgressReporter for ConsoleProgress {
    fn report(&self, event: ProgressEvent) {
        let tag = self.paint(Tone::Label, "[render]");
        match event {
            ProgressEvent::BatchStarted { total_files } => {
                self.total.store(total_files, Ordering::SeqCst);
                self.finished.store(0, Ordering::SeqCst);
                if total_files > 0 {
                    let files = plural(total_files, "file");
                    self.sink.line(&format!("{} Rendering {}...", tag, files));
                }
            }
            ProgressEvent::FileStarted { file } => {
                self.sink.line(&format!("{} {}...", tag, file));
            }
            ProgressEvent::FileCompleted { file, status, images, duration_ms } => {
                let n = self.finished.fetch_add(1, Ordering::SeqCst) + 1;
                let total = self.total.load(Ordering::SeqCst);
                let mark = match status {
                    FileStatus::Success => self.paint(Tone::Good, "ok"),
                    FileStatus::Failed(_) => self.paint(Tone::Bad, "FAILED"),
                };
                self.sink.line(&format!(
                    "{} [{}/{}] {} {} ({}, {})",
                    tag,
                    n,
                    total,
                    mark,
                    file,
                    plural(images, "image"),
                    elapsed_label(duration_ms)
                ));
                if let FileStatus::Failed(reason) = status {
                    self.sink.line(&format!("        {}", self.paint(Tone::Bad, &reason)));
                }
            }
            ProgressEvent::BatchCompleted { succeeded, failed, duration_ms } => {
                let line = if failed == 0 {
                    format!(
                        "{} {} rendered in {}",
                        self.paint(Tone::Good, "[done]"),
                        succeeded,
                        elapsed_label(duration_ms)
                    )
                } else {
                    format!(
                        "{} {} rendered, {} failed in {}",
                        self.paint(Tone::Bad, "[error]"),
                        succeeded,
                        failed,
                        elapsed_label(duration_ms)
                    )
                };
                self.sink.line(&line);
            }
            ProgressEvent::Warning { file, message } => {
                let tag = self.paint(Tone::Warn, "[warn]");
                match file {
                    Some(file) => self.sink.line(&format!("{} {}: {}", tag, file, message)),
                    None => self.sink.line(&format!("{} {}", tag, message)),
                }
            }
        }
    }

    fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// One JSON object per event, newline separated, on stderr.
#[derive(Debug)]
pub struct JsonProgress {
    sink: Sink,
}

impl JsonProgress {
    pub fn new() -> Self {
        Self::with_output(std::io::stderr())
    }

    pub fn with_output<W: Write + Send + 'static>(output: W) -> Self {
        Self { sink: Sink::new(output) }
    }
}

impl Default for JsonProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for JsonProgress {
    fn report(&self, event: ProgressEvent) {
        if let Ok(json) = serde_json::to_string(&event) {
            self.sink.line(&json);
        }
    }

    fn is_verbose(&self) -> bool {
        true
    }
}

/// `850ms`, `1.5s`.
fn elapsed_label(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else {
        format!("{:.1}s", ms as f64 / 1000.0)
    }
}
