//! Configuration loading and discovery for `tgrid.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::TgridConfig;
use crate::renderer::RenderStyle;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name searched for in the working directory and its parents.
pub const CONFIG_FILE_NAME: &str = "tgrid.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse tgrid.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub style: Option<RenderStyle>,
    pub cell_size: Option<u32>,
    pub line_width: Option<u32>,
    pub dir: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub jobs: Option<usize>,
    pub cache_dir: Option<PathBuf>,
    pub step_increment: Option<usize>,
    pub preview: Option<bool>,
    pub frame_ms: Option<u32>,
    pub loop_anim: Option<bool>,
}

/// Find tgrid.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for tgrid.toml
/// 2. Check XDG_CONFIG_HOME/tetrogrid/tgrid.toml (or ~/.config/tetrogrid/tgrid.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }
    find_xdg_config()
}

/// Find tgrid.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("tetrogrid").join(CONFIG_FILE_NAME);
    config_path.exists().then_some(config_path)
}

/// Find tgrid.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a tgrid.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns the default
/// configuration.
pub fn load_config(path: Option<&Path>) -> Result<TgridConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => Ok(TgridConfig::default()),
    }
}

fn load_config_file(path: &Path) -> Result<TgridConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: TgridConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Apply CLI overrides on top of a loaded configuration.
pub fn merge_cli_overrides(mut config: TgridConfig, overrides: &CliOverrides) -> TgridConfig {
    if let Some(style) = overrides.style {
        config.render.style = style;
    }
    if let Some(cell_size) = overrides.cell_size {
        config.render.cell_size = cell_size;
    }
    if let Some(line_width) = overrides.line_width {
        config.render.line_width = line_width;
    }
    if let Some(dir) = &overrides.dir {
        config.batch.dir = dir.clone();
    }
    if let Some(out) = &overrides.out {
        config.batch.out = Some(out.clone());
    }
    if let Some(jobs) = overrides.jobs {
        config.batch.jobs = jobs;
    }
    if let Some(cache_dir) = &overrides.cache_dir {
        config.viewer.cache_dir = cache_dir.clone();
    }
    if let Some(step_increment) = overrides.step_increment {
        config.viewer.step_increment = step_increment;
    }
    if let Some(preview) = overrides.preview {
        config.viewer.preview = preview;
    }
    if let Some(frame_ms) = overrides.frame_ms {
        config.animate.frame_ms = frame_ms;
    }
    if let Some(loop_anim) = overrides.loop_anim {
        config.animate.loop_anim = loop_anim;
    }
    config
}

/// Load configuration and apply overrides, validating the merged result.
pub fn load_with_overrides(
    path: Option<&Path>,
    overrides: &CliOverrides,
) -> Result<TgridConfig, ConfigError> {
    let config = merge_cli_overrides(load_config(path)?, overrides);
    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    #[test]
    fn test_find_config_from_walks_up() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "").unwrap();
        let nested = dir.path().join("a/b/c");
        fs::create_dir_all(&nested).unwrap();

        let found = find_config_from(nested).unwrap();
        assert_eq!(found, dir.path().join(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_load_config_explicit_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[render]\ncell_size = 24\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.render.cell_size, 24);
    }

    #[test]
    fn test_load_config_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("missing.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_load_config_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[render\ncell_size = ").unwrap();
        assert!(matches!(load_config(Some(&path)).unwrap_err(), ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_config_validation_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[render]\nfill = \"grey\"\n").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("render.fill"), "{}", message);
    }

    #[test]
    fn test_merge_overrides() {
        let overrides = CliOverrides {
            style: Some(RenderStyle::Color),
            cell_size: Some(4),
            out: Some(PathBuf::from("renders")),
            preview: Some(false),
            ..CliOverrides::default()
        };
        let config = merge_cli_overrides(TgridConfig::default(), &overrides);
        assert_eq!(config.render.style, RenderStyle::Color);
        assert_eq!(config.render.cell_size, 4);
        assert_eq!(config.batch.out, Some(PathBuf::from("renders")));
        assert!(!config.viewer.preview);
        assert_eq!(config.viewer.step_increment, 1);
    }

    #[test]
    fn test_overrides_are_validated() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "").unwrap();
        let overrides = CliOverrides { cell_size: Some(0), ..CliOverrides::default() };
        assert!(matches!(
            load_with_overrides(Some(&path), &overrides).unwrap_err(),
            ConfigError::Validation(_)
        ));
    }

    #[test]
    #[serial]
    fn test_find_xdg_config() {
        let dir = tempdir().unwrap();
        let config_dir = dir.path().join("tetrogrid");
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join(CONFIG_FILE_NAME), "").unwrap();

        let previous = env::var_os("XDG_CONFIG_HOME");
        env::set_var("XDG_CONFIG_HOME", dir.path());
        let found = find_xdg_config();
        match previous {
            Some(value) => env::set_var("XDG_CONFIG_HOME", value),
            None => env::remove_var("XDG_CONFIG_HOME"),
        }

        assert_eq!(found, Some(config_dir.join(CONFIG_FILE_NAME)));
    }
}
