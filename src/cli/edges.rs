//! Edges command implementation

use std::path::Path;
use std::process::ExitCode;

use serde::Serialize;

use crate::edges::{foreground_edges, CellEdges, Direction};
use crate::grid::{parse_grid_sequence, Grid};

use super::{read_input, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

#[derive(Debug, Serialize)]
struct EdgeReport {
    step: usize,
    rows: usize,
    cols: usize,
    cells: Vec<CellReport>,
}

#[derive(Debug, Serialize)]
struct CellReport {
    row: usize,
    col: usize,
    value: i64,
    connected: Vec<Direction>,
    boundary: Vec<Direction>,
}

impl From<CellEdges> for CellReport {
    fn from(cell: CellEdges) -> Self {
        Self {
            row: cell.row,
            col: cell.col,
            value: cell.value,
            connected: cell.connected.iter().collect(),
            boundary: cell.boundary().iter().collect(),
        }
    }
}

fn build_report(grid: &Grid, step: usize) -> EdgeReport {
    EdgeReport {
        step,
        rows: grid.rows(),
        cols: grid.cols(),
        cells: foreground_edges(grid).map(CellReport::from).collect(),
    }
}

/// Execute the edges command
pub fn run_edges(file: &Path, step: usize, json: bool) -> ExitCode {
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

    let grid = match step.checked_sub(1).and_then(|i| sequence.get(i)) {
        Some(g) => g,
        None => {
            eprintln!(
                "Error: Step {} out of range ({} has {} step(s))",
                step,
                file.display(),
                sequence.len()
            );
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    if json {
        let report = build_report(grid, step);
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        println!("Step {} ({}x{})", step, grid.rows(), grid.cols());
        for cell in foreground_edges(grid) {
            println!(
                "({},{}) value {} connected {} boundary {}",
                cell.row,
                cell.col,
                cell.value,
                cell.connected,
                cell.boundary()
            );
        }
    }

    ExitCode::from(EXIT_SUCCESS)
}
