//! Animated GIF export of grid sequences

use crate::grid::GridSequence;
use crate::output::{ensure_parent, OutputError};
use crate::renderer::{render_grid, RenderError, RenderOptions};
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Frame, RgbaImage};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use thiserror::Error;

/// Error type for sequence animation.
#[derive(Debug, Error)]
pub enum AnimateError {
    #[error("step {step}: {source}")]
    Render { step: usize, source: RenderError },
    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Encode frames as an animated GIF.
///
/// Frames smaller than the largest frame are placed at the top-left of a
/// canvas filled with `background`. An empty frame list writes nothing.
pub fn render_gif(
    frames: &[RgbaImage],
    duration_ms: u32,
    loop_anim: bool,
    background: image::Rgba<u8>,
    path: &Path,
) -> Result<(), OutputError> {
    if frames.is_empty() {
        return Ok(());
    }
    ensure_parent(path)?;

    let width = frames.iter().map(RgbaImage::width).max().unwrap_or(1);
    let height = frames.iter().map(RgbaImage::height).max().unwrap_or(1);

    let file = File::create(path)?;
    let mut encoder = GifEncoder::new(BufWriter::new(file));
    encoder.set_repeat(if loop_anim { Repeat::Infinite } else { Repeat::Finite(0) })?;

    // GIF delays are in centiseconds; clamp to at least one
    let delay_ms = (duration_ms / 10).max(1) * 10;
    for frame in frames {
        let canvas = if frame.dimensions() == (width, height) {
            frame.clone()
        } else {
            let mut canvas = RgbaImage::from_pixel(width, height, background);
            image::imageops::replace(&mut canvas, frame, 0, 0);
            canvas
        };
        let delay = image::Delay::from_numer_denom_ms(delay_ms, 1);
        encoder.encode_frame(Frame::from_parts(canvas, 0, 0, delay))?;
    }

    Ok(())
}

/// Render every step of `sequence` and write them as one GIF.
///
/// Returns the number of frames written.
pub fn render_sequence_gif(
    sequence: &GridSequence,
    options: &RenderOptions,
    duration_ms: u32,
    loop_anim: bool,
    path: &Path,
) -> Result<usize, AnimateError> {
    let frames = sequence
        .iter()
        .enumerate()
        .map(|(step, grid)| {
            render_grid(grid, options).map_err(|source| AnimateError::Render { step, source })
        })
        .collect::<Result<Vec<_>, _>>()?;
    render_gif(&frames, duration_ms, loop_anim, options.background, path)?;
    Ok(frames.len())
}
