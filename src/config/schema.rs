//! Configuration schema types for `tgrid.toml`
//!
//! Every section and field is optional; missing values take the defaults
//! below.
//!
//! ```toml
//! [render]
//! style = "outline"
//! cell_size = 16
//! line_width = 1
//! fill = "#333333"
//! border = "#FFFFFF"
//!
//! [batch]
//! dir = "output"
//! jobs = 4
//!
//! [viewer]
//! cache_dir = "output/viewer_cache"
//! step_increment = 5
//! ```

use crate::color::parse_color;
use crate::renderer::{RenderOptions, RenderStyle};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Rendering defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub style: RenderStyle,
    /// Cell side length in pixels
    pub cell_size: u32,
    /// Edge thickness in pixels
    pub line_width: u32,
    /// Foreground cell fill (outline style)
    pub fill: String,
    /// Boundary edge color (outline style)
    pub border: String,
    /// Image background
    pub background: String,
    /// Cell grid line color (color style)
    pub grid_line: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            style: RenderStyle::Outline,
            cell_size: 16,
            line_width: 1,
            fill: "#333333".to_string(),
            border: "#FFFFFF".to_string(),
            background: "#FFFFFF".to_string(),
            grid_line: "#000000".to_string(),
        }
    }
}

/// Batch conversion settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Directory searched for grid files
    pub dir: PathBuf,
    /// Directory for PNGs (defaults to next to each input)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out: Option<PathBuf>,
    /// Parallel workers; 0 uses all available cores
    pub jobs: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { dir: PathBuf::from("output"), out: None, jobs: 0 }
    }
}

/// Interactive viewer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Where per-step PNGs are cached
    pub cache_dir: PathBuf,
    /// Steps moved by next/previous
    pub step_increment: usize,
    /// Print a terminal preview of each step
    pub preview: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("output/viewer_cache"),
            step_increment: 1,
            preview: true,
        }
    }
}

/// GIF export settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimateConfig {
    /// Delay per frame in milliseconds
    pub frame_ms: u32,
    /// Loop forever
    #[serde(rename = "loop")]
    pub loop_anim: bool,
}

impl Default for AnimateConfig {
    fn default() -> Self {
        Self { frame_ms: 200, loop_anim: true }
    }
}

/// Complete tgrid.toml configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TgridConfig {
    pub render: RenderConfig,
    pub batch: BatchConfig,
    pub viewer: ViewerConfig,
    pub animate: AnimateConfig,
}

/// Configuration validation error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "render.cell_size")
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tgrid.toml: '{}' {}", self.field, self.message)
    }
}

impl TgridConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();
        let mut push = |field: &str, message: String| {
            errors.push(ConfigValidationError { field: field.to_string(), message });
        };

        if self.render.cell_size == 0 {
            push("render.cell_size", "must be a positive integer".to_string());
        }
        for (field, value) in [
            ("render.fill", &self.render.fill),
            ("render.border", &self.render.border),
            ("render.background", &self.render.background),
            ("render.grid_line", &self.render.grid_line),
        ] {
            if let Err(e) = parse_color(value) {
                push(field, format!("is not a valid color '{}': {}", value, e));
            }
        }
        if self.viewer.step_increment == 0 {
            push("viewer.step_increment", "must be a positive integer".to_string());
        }
        if self.animate.frame_ms == 0 {
            push("animate.frame_ms", "must be a positive integer".to_string());
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

impl RenderConfig {
    /// Resolve color strings into render options.
    ///
    /// Invalid colors fall back to the defaults; `validate` reports them.
    pub fn to_options(&self) -> RenderOptions {
        let defaults = RenderOptions::default();
        RenderOptions {
            style: self.style,
            cell_size: self.cell_size.max(1),
            line_width: self.line_width,
            fill: parse_color(&self.fill).unwrap_or(defaults.fill),
            border: parse_color(&self.border).unwrap_or(defaults.border),
            background: parse_color(&self.background).unwrap_or(defaults.background),
            grid_line: parse_color(&self.grid_line).unwrap_or(defaults.grid_line),
        }
    }
}
