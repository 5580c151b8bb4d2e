use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::light_field::common::error::{Axis, EpiError, Result};
use crate::light_field::container::{ImageBlob, SampleEncoding};
use crate::light_field::fixed_point::FixedPointFormat;
use super::planes::SlicePlanes;
use super::types::{AxisCalibration, Calibration, FusionParams};

/// Disparity solver seam.
///
/// Implementors provide the per-slice solve and per-pixel fusion; slicing,
/// validation, parallelism and scattering back into image coordinates are
/// shared.
pub trait DisparityEstimator: Send + Sync {
    fn format(&self) -> &FixedPointFormat;

    /// Disparity for every position of one EPI, one value per spatial sample.
    fn solve_line(&self, planes: &SlicePlanes, calibration: &AxisCalibration) -> Vec<i64>;

    /// Confidence-weighted mix of the two axis estimates at one pixel.
    fn fuse_pixel(&self, z_h: i64, z_v: i64, c_h: i64, c_v: i64, params: &FusionParams) -> i64;

    /// Image-sized disparity map for one axis.
    ///
    /// `epis` and `angular_diffs` hold one entry per image row (horizontal) or
    /// column (vertical). A failing slice is reported with its axis and index.
    #[instrument(skip_all, fields(axis = %axis, slices = epis.len(), window = window))]
    fn estimate_axis(
        &self,
        axis: Axis,
        epis: &[ImageBlob],
        angular_diffs: &[ImageBlob],
        width: u32,
        height: u32,
        calibration: &Calibration,
        window: usize,
    ) -> Result<ImageBlob> {
        let (slices, line_len) = match axis {
            Axis::Horizontal => (height as usize, width as usize),
            Axis::Vertical => (width as usize, height as usize),
        };
        if epis.len() != slices || angular_diffs.len() != slices {
            return Err(EpiError::InvalidFormat(format!(
                "expected {} {} slices, got {} EPIs and {} difference volumes",
                slices,
                axis,
                epis.len(),
                angular_diffs.len()
            )));
        }

        let axis_cal = calibration.for_axis(axis);
        let lines = epis
            .par_iter()
            .zip(angular_diffs.par_iter())
            .enumerate()
            .map(|(i, (epi, diff))| {
                let solve = || -> Result<Vec<i64>> {
                    if epi.width() as usize != line_len {
                        return Err(EpiError::InvalidFormat(format!(
                            "EPI width {} does not match image extent {}",
                            epi.width(),
                            line_len
                        )));
                    }
                    let planes = SlicePlanes::build(epi, diff, self.format(), window)?;
                    Ok(self.solve_line(&planes, &axis_cal))
                };
                solve().map_err(|e| e.in_slice(axis, i))
            })
            .collect::<Result<Vec<_>>>()?;

        let w = width as usize;
        let mut out = vec![0i64; w * height as usize];
        match axis {
            Axis::Horizontal => {
                for (y, line) in lines.iter().enumerate() {
                    out[y * w..(y + 1) * w].copy_from_slice(line);
                }
            }
            Axis::Vertical => {
                for (x, line) in lines.iter().enumerate() {
                    for (y, &z) in line.iter().enumerate() {
                        out[y * w + x] = z;
                    }
                }
            }
        }

        debug!(axis = %axis, "Disparity map estimated");
        ImageBlob::from_fixed_values(width, height, &out, self.format())
    }

    /// Fuses the per-axis disparity maps using the per-axis confidence maps.
    #[instrument(skip_all)]
    fn fuse(
        &self,
        z_h: &ImageBlob,
        z_v: &ImageBlob,
        c_h: &ImageBlob,
        c_v: &ImageBlob,
        params: &FusionParams,
    ) -> Result<ImageBlob> {
        params.validate()?;
        for (what, map) in [
            ("horizontal disparity", z_h),
            ("vertical disparity", z_v),
            ("horizontal confidence", c_h),
            ("vertical confidence", c_v),
        ] {
            map.expect_layout(what, SampleEncoding::FixedU24, 1)?;
            if !map.same_geometry(z_h) {
                return Err(EpiError::InvalidFormat(format!(
                    "{} is {}x{} but horizontal disparity is {}x{}",
                    what,
                    map.width(),
                    map.height(),
                    z_h.width(),
                    z_h.height()
                )));
            }
        }

        let format = self.format();
        let width = z_h.width() as usize;
        let height = z_h.height() as usize;
        let fused: Vec<i64> = (0..width * height)
            .into_par_iter()
            .map(|i| {
                let (x, y) = (i % width, i / width);
                self.fuse_pixel(
                    z_h.fixed_value(x, y, 0, format),
                    z_v.fixed_value(x, y, 0, format),
                    c_h.fixed_value(x, y, 0, format),
                    c_v.fixed_value(x, y, 0, format),
                    params,
                )
            })
            .collect();

        ImageBlob::from_fixed_values(z_h.width(), z_h.height(), &fused, format)
    }
}
