use crate::light_field::fixed_point::FixedPointFormat;
use super::estimator::DisparityEstimator;
use super::planes::SlicePlanes;
use super::types::{AxisCalibration, FusionParams};

/// Floating-point counterpart of [`super::FixedPointDisparity`].
///
/// Shares the integer gradient planes but solves the slope, the weighted mean
/// and the fusion in `f64`, quantising each result once at the end. The mean
/// carries the same half-unit offset as the integer solver, so the two differ
/// only by the precision the integer path loses.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceDisparity {
    format: FixedPointFormat,
}

impl ReferenceDisparity {
    pub fn new(format: FixedPointFormat) -> Self {
        Self { format }
    }

    fn quantise(&self, v: f64) -> i64 {
        // half up for positive values, toward zero for negative ones
        let q = (v * self.format.one() as f64 + 0.5).trunc();
        if q.is_finite() { q as i64 } else { 0 }
    }
}

impl DisparityEstimator for ReferenceDisparity {
    fn format(&self) -> &FixedPointFormat {
        &self.format
    }

    fn solve_line(&self, planes: &SlicePlanes, calibration: &AxisCalibration) -> Vec<i64> {
        let slope_scale = if calibration.spatial == 0 {
            0.0
        } else {
            calibration.angular as f64 / calibration.spatial as f64
        };
        let inv_d = if calibration.baseline == 0 {
            0.0
        } else {
            1.0 / self.format.to_f64(calibration.baseline)
        };
        let len = planes.len;

        (0..len)
            .map(|x| {
                let mut num = 0.0f64;
                let mut den = 0.0f64;
                for a in 0..planes.angles {
                    let i = a * len + x;
                    let w = planes.w_sum[i];
                    let s_uu = planes.s_uu[i];
                    if w <= 0 || s_uu <= 0 {
                        continue;
                    }
                    let k_hat = planes.s_uv[i] as f64 / s_uu as f64;
                    let w = w as f64;
                    num += slope_scale * k_hat * w;
                    den += w;
                }

                if den <= 0.0 {
                    return 0;
                }
                // same half-unit offset as the integer mean
                let mean = num / den + if num >= 0.0 { 0.5 } else { -0.5 };
                self.quantise((1.0 + mean) * inv_d)
            })
            .collect()
    }

    fn fuse_pixel(&self, z_h: i64, z_v: i64, c_h: i64, c_v: i64, params: &FusionParams) -> i64 {
        let f = &self.format;
        let (floor, cap) = (f.to_f64(params.floor), f.to_f64(params.cap));
        let weight = |c: i64| {
            let c = f.to_f64(c.max(0));
            let c = if c < floor { floor } else if c > cap { cap } else { c };
            c.powi(params.temperature as i32)
        };
        let p_h = weight(c_h);
        let p_v = weight(c_v);

        let den = p_h + p_v + f.to_f64(params.eps);
        if den <= 0.0 {
            return 0;
        }
        self.quantise((p_h * f.to_f64(z_h) + p_v * f.to_f64(z_v)) / den)
    }
}
