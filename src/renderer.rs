//! Grid rendering to image buffers

use crate::color::value_color;
use crate::edges::{foreground_edges, Direction};
use crate::grid::Grid;
use clap::ValueEnum;
use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest width or height, in pixels, of a rendered image.
pub const MAX_IMAGE_DIMENSION: u32 = 32_768;

/// Error type for rendering failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The output image would exceed the size limit
    #[error("{rows}x{cols} grid at cell size {cell_size} exceeds {max}px")]
    TooLarge { rows: usize, cols: usize, cell_size: u32, max: u32 },
}

/// How cells are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RenderStyle {
    /// Uniform fill with region outlines (borders only between different values)
    #[default]
    Outline,
    /// One palette color per distinct value, every cell edge lined
    Color,
}

/// Rendering parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub style: RenderStyle,
    /// Side length of one cell in pixels
    pub cell_size: u32,
    /// Thickness of drawn edges in pixels
    pub line_width: u32,
    /// Outline style: foreground cell fill
    pub fill: Rgba<u8>,
    /// Outline style: boundary edge color
    pub border: Rgba<u8>,
    /// Image background behind empty cells
    pub background: Rgba<u8>,
    /// Color style: cell grid line color
    pub grid_line: Rgba<u8>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            style: RenderStyle::Outline,
            cell_size: 16,
            line_width: 1,
            fill: Rgba([0x33, 0x33, 0x33, 255]),
            border: Rgba([255, 255, 255, 255]),
            background: Rgba([255, 255, 255, 255]),
            grid_line: Rgba([0, 0, 0, 255]),
        }
    }
}

impl RenderOptions {
    /// Line width actually drawn: never more than half a cell.
    pub fn effective_line_width(&self) -> u32 {
        self.line_width.min(self.cell_size.max(1) / 2)
    }
}

/// Render a grid to an RGBA image.
///
/// The image is `cols * cell_size` wide and `rows * cell_size` tall. In
/// outline style every non-background cell is filled and each of its boundary
/// edges is drawn as a strip inside the cell along that side, so a region of
/// equal values gets a single outline with no interior seams.
///
/// # Examples
///
/// ```
/// use tetrogrid::grid::parse_grid;
/// use tetrogrid::renderer::{render_grid, RenderOptions};
///
/// let grid = parse_grid("1 1\n0 2").unwrap();
/// let options = RenderOptions { cell_size: 4, ..RenderOptions::default() };
/// let image = render_grid(&grid, &options).unwrap();
/// assert_eq!(image.dimensions(), (8, 8));
/// ```
pub fn render_grid(grid: &Grid, options: &RenderOptions) -> Result<RgbaImage, RenderError> {
    let cell = options.cell_size.max(1);
    let (width, height) = image_dimensions(grid, cell)?;
    let mut image = RgbaImage::from_pixel(width, height, options.background);

    match options.style {
        RenderStyle::Outline => draw_outlines(&mut image, grid, cell, options),
        RenderStyle::Color => draw_colored(&mut image, grid, cell, options),
    }

    Ok(image)
}

fn image_dimensions(grid: &Grid, cell: u32) -> Result<(u32, u32), RenderError> {
    let too_large = || RenderError::TooLarge {
        rows: grid.rows(),
        cols: grid.cols(),
        cell_size: cell,
        max: MAX_IMAGE_DIMENSION,
    };
    let scale = |n: usize| {
        u32::try_from(n)
            .ok()
            .and_then(|n| n.checked_mul(cell))
            .filter(|&px| px <= MAX_IMAGE_DIMENSION)
    };
    let width = scale(grid.cols()).ok_or_else(too_large)?;
    let height = scale(grid.rows()).ok_or_else(too_large)?;
    Ok((width, height))
}

fn draw_outlines(image: &mut RgbaImage, grid: &Grid, cell: u32, options: &RenderOptions) {
    let lw = options.effective_line_width();
    for edges in foreground_edges(grid) {
        let x = edges.col as u32 * cell;
        let y = edges.row as u32 * cell;
        fill_rect(image, x, y, cell, cell, options.fill);
        for dir in edges.boundary().iter() {
            draw_edge(image, x, y, cell, lw, dir, options.border);
        }
    }
}

fn draw_colored(image: &mut RgbaImage, grid: &Grid, cell: u32, options: &RenderOptions) {
    let values = grid.distinct_values();
    let lw = options.effective_line_width();
    for (row, cells) in grid.iter_rows().enumerate() {
        for (col, value) in cells.iter().enumerate() {
            let x = col as u32 * cell;
            let y = row as u32 * cell;
            fill_rect(image, x, y, cell, cell, value_color(&values, *value));
            for dir in Direction::ALL {
                draw_edge(image, x, y, cell, lw, dir, options.grid_line);
            }
        }
    }
}

/// Draw one side of the cell whose top-left pixel is `(x, y)`.
fn draw_edge(
    image: &mut RgbaImage,
    x: u32,
    y: u32,
    cell: u32,
    lw: u32,
    dir: Direction,
    color: Rgba<u8>,
) {
    if lw == 0 {
        return;
    }
    match dir {
        Direction::Top => fill_rect(image, x, y, cell, lw, color),
        Direction::Bottom => fill_rect(image, x, y + cell - lw, cell, lw, color),
        Direction::Left => fill_rect(image, x, y, lw, cell, color),
        Direction::Right => fill_rect(image, x + cell - lw, y, lw, cell, color),
    }
}

/// Fill a rectangle, clipped to the image bounds.
fn fill_rect(image: &mut RgbaImage, x: u32, y: u32, w: u32, h: u32, color: Rgba<u8>) {
    let x_end = x.saturating_add(w).min(image.width());
    let y_end = y.saturating_add(h).min(image.height());
    for py in y..y_end {
        for px in x..x_end {
            image.put_pixel(px, py, color);
        }
    }
}
