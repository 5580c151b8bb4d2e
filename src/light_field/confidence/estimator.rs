use rayon::prelude::*;
use tracing::{debug, info, instrument};

use crate::light_field::common::error::{Axis, EpiError, Result};
use crate::light_field::container::{ImageBlob, SampleEncoding};
use crate::light_field::epi::EpiSet;
use crate::light_field::fixed_point::{FixedPointFormat, round_half_div2};

/// Texture-strength maps per axis plus the angular-difference volumes the
/// disparity stage consumes unchanged.
#[derive(Debug, Clone)]
pub struct ConfidenceMaps {
    /// `C_h`, image sized, one channel
    pub horizontal: ImageBlob,
    /// `C_v`, image sized, one channel
    pub vertical: ImageBlob,
    /// `dL/du` per image row, shape `U x width`
    pub du_h: Vec<ImageBlob>,
    /// `dL/dv` per image column, shape `V x height`
    pub dv_v: Vec<ImageBlob>,
}

/// Confidence from the mean absolute angular central difference.
#[derive(Debug, Clone, Copy)]
pub struct ConfidenceEstimator {
    format: FixedPointFormat,
    channel: usize,
}

impl ConfidenceEstimator {
    pub fn new(format: FixedPointFormat, channel: usize) -> Self {
        Self { format, channel }
    }

    pub fn channel(&self) -> usize {
        self.channel
    }

    #[instrument(skip_all, fields(rows = epis.horizontal.len(), columns = epis.vertical.len()))]
    pub fn estimate(&self, epis: &EpiSet) -> Result<ConfidenceMaps> {
        let width = epis.width as usize;
        let height = epis.height as usize;

        if epis.horizontal.len() != height || epis.vertical.len() != width {
            return Err(EpiError::InvalidFormat(format!(
                "expected {} row EPIs and {} column EPIs, got {} and {}",
                height,
                width,
                epis.horizontal.len(),
                epis.vertical.len()
            )));
        }

        let rows = self.estimate_axis(&epis.horizontal, Axis::Horizontal, width)?;
        let columns = self.estimate_axis(&epis.vertical, Axis::Vertical, height)?;

        let mut c_h = Vec::with_capacity(width * height);
        let mut du_h = Vec::with_capacity(height);
        for (diff, line) in rows {
            c_h.extend_from_slice(&line);
            du_h.push(diff);
        }

        let mut c_v = vec![0i64; width * height];
        let mut dv_v = Vec::with_capacity(width);
        for (x, (diff, line)) in columns.into_iter().enumerate() {
            for (y, v) in line.into_iter().enumerate() {
                c_v[y * width + x] = v;
            }
            dv_v.push(diff);
        }

        info!(
            angular_h = epis.angular_h(),
            angular_v = epis.angular_v(),
            "Confidence maps computed"
        );

        Ok(ConfidenceMaps {
            horizontal: ImageBlob::from_fixed_values(epis.width, epis.height, &c_h, &self.format)?,
            vertical: ImageBlob::from_fixed_values(epis.width, epis.height, &c_v, &self.format)?,
            du_h,
            dv_v,
        })
    }

    fn estimate_axis(
        &self,
        epis: &[ImageBlob],
        axis: Axis,
        line_len: usize,
    ) -> Result<Vec<(ImageBlob, Vec<i64>)>> {
        epis.par_iter()
            .enumerate()
            .map(|(i, epi)| {
                if epi.width() as usize != line_len {
                    return Err(EpiError::InvalidFormat(format!(
                        "EPI width {} does not match image extent {}",
                        epi.width(),
                        line_len
                    ))
                    .in_slice(axis, i));
                }
                self.angular_differences(epi).map_err(|e| e.in_slice(axis, i))
            })
            .collect()
    }

    /// Central differences along the angular axis of one EPI and the per-position
    /// confidence (rounded mean of `|d|` over interior angles).
    ///
    /// Angular rows `0` and `A - 1` are zero. With fewer than three angular
    /// samples every difference and the confidence are zero.
    pub fn angular_differences(&self, epi: &ImageBlob) -> Result<(ImageBlob, Vec<i64>)> {
        if epi.encoding() != SampleEncoding::FixedU24 {
            return Err(EpiError::InvalidFormat(format!(
                "EPI must be fixed-point encoded, got encoding {}",
                epi.encoding().code()
            )));
        }
        if self.channel >= epi.channels() as usize {
            return Err(EpiError::InvalidFormat(format!(
                "confidence channel {} out of range for {} channel EPI",
                self.channel,
                epi.channels()
            )));
        }

        let n = epi.width() as usize;
        let angles = epi.height() as usize;
        let mut diffs = vec![0i64; angles * n];
        let mut confidence = vec![0i64; n];

        if angles >= 3 {
            let mut sum_abs = vec![0i64; n];
            for a in 1..angles - 1 {
                let row = &mut diffs[a * n..(a + 1) * n];
                for (x, d_out) in row.iter_mut().enumerate() {
                    let lm = epi.fixed_value(x, a - 1, self.channel, &self.format);
                    let lp = epi.fixed_value(x, a + 1, self.channel, &self.format);
                    let d = round_half_div2(lp - lm);
                    *d_out = d;
                    sum_abs[x] += d.abs();
                }
            }

            let interior = (angles - 2) as i64;
            let half = interior >> 1;
            for (c, s) in confidence.iter_mut().zip(&sum_abs) {
                *c = (s + half) / interior;
            }
        } else {
            debug!(angles, "Fewer than three angular samples, confidence is zero");
        }

        let diff = ImageBlob::from_fixed_values(n as u32, angles as u32, &diffs, &self.format)?;
        Ok((diff, confidence))
    }
}

/// Pixelwise rounded average of two confidence maps.
pub fn fuse_avg(c_h: &ImageBlob, c_v: &ImageBlob, format: &FixedPointFormat) -> Result<ImageBlob> {
    c_h.expect_layout("horizontal confidence", SampleEncoding::FixedU24, 1)?;
    c_v.expect_layout("vertical confidence", SampleEncoding::FixedU24, 1)?;
    if !c_h.same_geometry(c_v) {
        return Err(EpiError::InvalidFormat(format!(
            "confidence maps differ in size: {}x{} vs {}x{}",
            c_h.width(),
            c_h.height(),
            c_v.width(),
            c_v.height()
        )));
    }

    let width = c_h.width() as usize;
    let height = c_h.height() as usize;
    let mut avg = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let a = c_h.fixed_value(x, y, 0, format);
            let b = c_v.fixed_value(x, y, 0, format);
            avg.push(round_half_div2(a + b));
        }
    }

    ImageBlob::from_fixed_values(c_h.width(), c_h.height(), &avg, format)
}
