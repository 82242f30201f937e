//! Terminal preview of grids
//!
//! Each cell is printed two characters wide. With color enabled, cells get a
//! 24-bit ANSI background from the region palette; without color, each region
//! value maps to a letter and background to `.`. Letters are chosen from the
//! region boundaries so that touching regions never share one.

use crate::color::value_color;
use crate::edges::foreground_edges;
use crate::grid::Grid;
use image::Rgba;
use std::collections::{BTreeMap, BTreeSet};

/// ANSI escape sequence to reset all formatting
pub const ANSI_RESET: &str = "\x1b[0m";

/// Background used for empty cells in color previews.
const EMPTY_BG: &str = "\x1b[48;5;236m";

/// Convert RGBA color to ANSI 24-bit background escape sequence.
///
/// Transparent colors (alpha = 0) are rendered as a dark gray background.
///
/// # Examples
///
/// ```
/// use tetrogrid::terminal::color_to_ansi_bg;
/// use image::Rgba;
///
/// assert_eq!(color_to_ansi_bg(Rgba([255, 0, 0, 255])), "\x1b[48;2;255;0;0m");
/// assert_eq!(color_to_ansi_bg(Rgba([0, 0, 0, 0])), "\x1b[48;5;236m");
/// ```
pub fn color_to_ansi_bg(rgba: Rgba<u8>) -> String {
    if rgba[3] == 0 {
        EMPTY_BG.to_string()
    } else {
        format!("\x1b[48;2;{};{};{}m", rgba[0], rgba[1], rgba[2])
    }
}

const GLYPHS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Assign each foreground value a glyph index that differs from every
/// region it shares an edge with.
///
/// Values are taken in sorted order and get the lowest index no already
/// assigned neighbor uses, so small grids read `A`, `B`, `C`... and large
/// tilings reuse letters only between regions that do not touch.
fn assign_glyphs(grid: &Grid) -> BTreeMap<i64, usize> {
    let mut touching: BTreeMap<i64, BTreeSet<i64>> = BTreeMap::new();
    for cell in foreground_edges(grid) {
        let entry = touching.entry(cell.value).or_default();
        for dir in cell.boundary().iter() {
            if let Some((r, c)) = dir.neighbor(cell.row, cell.col, grid.rows(), grid.cols()) {
                let other = grid[(r, c)];
                if other != 0 && other != cell.value {
                    entry.insert(other);
                }
            }
        }
    }

    let mut glyphs: BTreeMap<i64, usize> = BTreeMap::new();
    for (rank, (value, neighbors)) in touching.iter().enumerate() {
        let taken: BTreeSet<usize> =
            neighbors.iter().filter_map(|n| glyphs.get(n).copied()).collect();
        let index = (0..GLYPHS.len()).find(|i| !taken.contains(i)).unwrap_or(rank % GLYPHS.len());
        glyphs.insert(*value, index);
    }
    glyphs
}

/// Render `grid` as terminal text, one line per row.
///
/// In color mode a region gets the same palette color as in color-style
/// images (rank among all distinct values, background included) and
/// background cells are dark gray. In plain mode regions get letters, with
/// touching regions always lettered differently, and background is `.`.
pub fn render_preview(grid: &Grid, use_color: bool) -> String {
    let values = grid.distinct_values();
    let glyphs = if use_color { BTreeMap::new() } else { assign_glyphs(grid) };
    let mut out = String::new();

    for row in grid.iter_rows() {
        for &value in row {
            match (use_color, value) {
                (true, 0) => {
                    out.push_str(EMPTY_BG);
                    out.push_str("  ");
                }
                (true, _) => {
                    out.push_str(&color_to_ansi_bg(value_color(&values, value)));
                    out.push_str("  ");
                }
                (false, 0) => out.push_str(". "),
                (false, _) => {
                    let glyph = GLYPHS[glyphs.get(&value).copied().unwrap_or(0)] as char;
                    out.push(glyph);
                    out.push(glyph);
                }
            }
        }
        if use_color {
            out.push_str(ANSI_RESET);
        }
        out.push('\n');
    }

    out
}
