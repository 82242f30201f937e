//! Configuration module
//!
//! Provides types, discovery, and loading for `tgrid.toml`.

pub mod loader;
pub mod schema;

pub use loader::{load_config, load_with_overrides, CliOverrides, ConfigError};
pub use schema::*;
