//! Tetrogrid - Library for parsing and rendering integer cell grids
//!
//! This library provides functionality to:
//! - Parse whitespace-separated grids and blank-line separated grid sequences
//! - Classify which sides of each cell join a same-valued neighbor
//! - Render grids to PNG as outlined regions or colored cells
//! - Convert batches of solver output files in parallel
//! - Step through a grid sequence with cached per-step images

pub mod batch;
pub mod cli;
pub mod color;
pub mod config;
pub mod discovery;
pub mod edges;
pub mod gif;
pub mod grid;
pub mod output;
pub mod progress;
pub mod renderer;
pub mod stepper;
pub mod terminal;
pub mod viewer;
