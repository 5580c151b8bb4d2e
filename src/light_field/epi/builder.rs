use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::light_field::common::error::{EpiError, Result};
use crate::light_field::container::{ImageBlob, SampleEncoding};
use super::types::{EpiSet, FrameStack};

/// Channel count of the blurred RGB frames the builder consumes.
const EPI_CHANNELS: u8 = 3;

/// Builds every horizontal (per-row) and vertical (per-column) EPI.
///
/// Both stacks must hold fixed-point RGB frames of the same width and height.
/// Angular counts may differ between the two stacks.
#[instrument(skip_all, fields(u = h_stack.len(), v = v_stack.len()))]
pub fn build_epis(h_stack: &FrameStack, v_stack: &FrameStack) -> Result<EpiSet> {
    h_stack
        .first()
        .expect_layout("horizontal stack frame", SampleEncoding::FixedU24, EPI_CHANNELS)?;
    v_stack
        .first()
        .expect_layout("vertical stack frame", SampleEncoding::FixedU24, EPI_CHANNELS)?;

    if h_stack.width() != v_stack.width() || h_stack.height() != v_stack.height() {
        return Err(EpiError::InvalidFormat(format!(
            "horizontal stack is {}x{} but vertical stack is {}x{}",
            h_stack.width(),
            h_stack.height(),
            v_stack.width(),
            v_stack.height()
        )));
    }

    let width = h_stack.width();
    let height = h_stack.height();

    let horizontal = (0..height as usize)
        .into_par_iter()
        .map(|y| horizontal_epi(h_stack, y))
        .collect::<Result<Vec<_>>>()?;

    let vertical = (0..width as usize)
        .into_par_iter()
        .map(|x| vertical_epi(v_stack, x))
        .collect::<Result<Vec<_>>>()?;

    debug!(
        rows = horizontal.len(),
        columns = vertical.len(),
        "EPIs assembled"
    );

    Ok(EpiSet {
        width,
        height,
        horizontal,
        vertical,
    })
}

/// `epi[u][x] = stack[u][y][x]`: row `y` of every frame, stacked by angle.
pub fn horizontal_epi(stack: &FrameStack, y: usize) -> Result<ImageBlob> {
    let first = stack.first();
    if y >= first.height() as usize {
        return Err(EpiError::InvalidFormat(format!(
            "row {} outside a stack of height {}",
            y,
            first.height()
        )));
    }
    let row_bytes = first.row_bytes();
    let row_base = y * row_bytes;

    let mut payload = Vec::with_capacity(row_bytes * stack.len());
    for frame in stack.frames() {
        payload.extend_from_slice(&frame.payload()[row_base..row_base + row_bytes]);
    }

    ImageBlob::new(
        first.width(),
        stack.len() as u32,
        first.channels(),
        first.encoding(),
        payload,
    )
}

/// `epi[v][y] = stack[v][y][x]`: column `x` of every frame, stacked by angle.
pub fn vertical_epi(stack: &FrameStack, x: usize) -> Result<ImageBlob> {
    let first = stack.first();
    if x >= first.width() as usize {
        return Err(EpiError::InvalidFormat(format!(
            "column {} outside a stack of width {}",
            x,
            first.width()
        )));
    }
    let bpp = first.bytes_per_pixel();
    let row_bytes = first.row_bytes();
    let height = first.height() as usize;

    let mut payload = Vec::with_capacity(bpp * height * stack.len());
    for frame in stack.frames() {
        let pay = frame.payload();
        let mut src = x * bpp;
        for _ in 0..height {
            payload.extend_from_slice(&pay[src..src + bpp]);
            src += row_bytes;
        }
    }

    ImageBlob::new(
        first.height(),
        stack.len() as u32,
        first.channels(),
        first.encoding(),
        payload,
    )
}
