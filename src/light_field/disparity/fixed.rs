use crate::light_field::fixed_point::{FixedPointFormat, floor_div, round_div, saturate_i64};
use super::estimator::DisparityEstimator;
use super::planes::SlicePlanes;
use super::types::{AxisCalibration, FusionParams};

/// Integer-only disparity solver.
///
/// Per angular row the local slope is `k = floor((S_uv << f) / S_uu)`, scaled
/// by the calibration ratio and averaged with weights `W_sum`. The mean adds
/// half a unit away from zero before the division, as the target hardware
/// does, and is mapped to disparity as `((1 + mean) * (1 / d)) >> f`. Rows
/// with no angular gradient are skipped and a position with no usable row
/// gives 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPointDisparity {
    format: FixedPointFormat,
}

impl FixedPointDisparity {
    pub fn new(format: FixedPointFormat) -> Self {
        Self { format }
    }
}

impl DisparityEstimator for FixedPointDisparity {
    fn format(&self) -> &FixedPointFormat {
        &self.format
    }

    fn solve_line(&self, planes: &SlicePlanes, calibration: &AxisCalibration) -> Vec<i64> {
        let f = self.format.frac_bits();
        let one = self.format.one() as i128;
        let slope_scale = self.format.div(calibration.angular, calibration.spatial) as i128;
        let inv_d = self.format.inv(calibration.baseline) as i128;
        let len = planes.len;

        (0..len)
            .map(|x| {
                let mut num = 0i128;
                let mut den = 0i128;
                for a in 0..planes.angles {
                    let i = a * len + x;
                    let w = planes.w_sum[i];
                    let s_uu = planes.s_uu[i];
                    if w <= 0 || s_uu <= 0 {
                        continue;
                    }
                    let k_hat = floor_div(planes.s_uv[i] << f, s_uu);
                    let ratio = slope_scale.saturating_mul(k_hat) >> f;
                    num = num.saturating_add(ratio.saturating_mul(w));
                    den += w;
                }

                if den <= 0 {
                    return 0;
                }
                let mean = half_unit_div(num, den, f);
                saturate_i64(one.saturating_add(mean).saturating_mul(inv_d) >> f)
            })
            .collect()
    }

    fn fuse_pixel(&self, z_h: i64, z_v: i64, c_h: i64, c_v: i64, params: &FusionParams) -> i64 {
        let weight = |c: i64| {
            let c = self.format.clamp(c.max(0), params.floor, params.cap);
            self.format.pow_int(c, params.temperature as i32) as i128
        };
        let p_h = weight(c_h);
        let p_v = weight(c_v);

        let num = (p_h * z_h as i128).saturating_add(p_v * z_v as i128);
        let den = p_h + p_v + params.eps as i128;
        if den <= 0 {
            return 0;
        }
        saturate_i64(round_div(num, den))
    }
}

/// `(num + den * 0.5) / den` for a numerator with twice the fraction bits of
/// `den`, applied to the magnitude so negative means move away from zero.
fn half_unit_div(num: i128, den: i128, frac_bits: u32) -> i128 {
    let half = den << (frac_bits - 1);
    if num >= 0 {
        num.saturating_add(half) / den
    } else {
        -(num.saturating_neg().saturating_add(half) / den)
    }
}
