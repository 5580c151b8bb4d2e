use rayon::prelude::*;
use tracing::{debug, info, instrument};

use crate::light_field::common::error::Result;
use crate::light_field::container::{ImageBlob, SampleEncoding};
use crate::light_field::epi::FrameStack;
use crate::light_field::fixed_point::{FixedPointFormat, write_u24};
use super::kernel::{reflect_index, KernelSize};

const RGB: usize = 3;

/// Integer 2D blur over 8-bit RGB frames, emitting fixed-point RGB frames.
#[derive(Debug, Clone, Copy)]
pub struct LowPassFilter {
    kernel: KernelSize,
    format: FixedPointFormat,
}

impl LowPassFilter {
    pub fn new(kernel: KernelSize, format: FixedPointFormat) -> Self {
        Self { kernel, format }
    }

    pub fn kernel(&self) -> KernelSize {
        self.kernel
    }

    /// Blurs every frame of a stack in parallel, keeping the stack order.
    #[instrument(skip_all, fields(frames = stack.len(), kernel = self.kernel.side()))]
    pub fn apply_stack(&self, stack: &FrameStack) -> Result<FrameStack> {
        let frames = stack
            .frames()
            .par_iter()
            .enumerate()
            .map(|(i, frame)| self.apply(frame).map_err(|e| e.in_frame(i)))
            .collect::<Result<Vec<_>>>()?;

        info!(frames = frames.len(), "Low-pass filtering complete");
        FrameStack::new(frames)
    }

    /// Convolves one u8 RGB frame with reflect boundaries, rounds by the kernel
    /// sum, clamps to `[0, 255]` and stores the result as biased fixed point.
    pub fn apply(&self, frame: &ImageBlob) -> Result<ImageBlob> {
        frame.expect_layout("low-pass input", SampleEncoding::U8, RGB as u8)?;

        let width = frame.width() as usize;
        let height = frame.height() as usize;
        let side = self.kernel.side();
        let radius = self.kernel.radius();
        let weights = self.kernel.weights();
        let norm = self.kernel.normalization();
        let half = norm / 2;

        debug!(width, height, kernel = side, "Convolving frame");

        // Reflected source indices for every output coordinate and tap offset.
        let col_taps: Vec<usize> = (0..width)
            .flat_map(|x| {
                (0..side).map(move |k| reflect_index(x as isize + k as isize - radius, width))
            })
            .collect();
        let row_taps: Vec<usize> = (0..height)
            .flat_map(|y| {
                (0..side).map(move |k| reflect_index(y as isize + k as isize - radius, height))
            })
            .collect();

        let raw = frame.payload();
        let out_row_bytes = width * RGB * 3;
        let mut out = vec![0u8; out_row_bytes * height];

        out.par_chunks_mut(out_row_bytes.max(1))
            .enumerate()
            .for_each(|(y, out_row)| {
                let rows = &row_taps[y * side..(y + 1) * side];
                for x in 0..width {
                    let cols = &col_taps[x * side..(x + 1) * side];
                    let mut acc = [0u32; RGB];

                    for (ky, &yy) in rows.iter().enumerate() {
                        let row_base = yy * width;
                        let wrow = &weights[ky * side..(ky + 1) * side];
                        for (&w, &xx) in wrow.iter().zip(cols) {
                            let base = (row_base + xx) * RGB;
                            acc[0] += raw[base] as u32 * w;
                            acc[1] += raw[base + 1] as u32 * w;
                            acc[2] += raw[base + 2] as u32 * w;
                        }
                    }

                    for (c, &sum) in acc.iter().enumerate() {
                        let v = ((sum + half) / norm).min(255) as i64;
                        let stored = self.format.bias(self.format.from_int(v));
                        write_u24(out_row, (x * RGB + c) * 3, stored);
                    }
                }
            });

        ImageBlob::new(
            frame.width(),
            frame.height(),
            RGB as u8,
            SampleEncoding::FixedU24,
            out,
        )
    }
}
