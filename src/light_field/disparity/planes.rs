use crate::light_field::common::error::{EpiError, Result};
use crate::light_field::container::{ImageBlob, SampleEncoding};
use crate::light_field::fixed_point::{FixedPointFormat, round_half_div2};
use super::box_sum::box_sum_2d;

/// Box-summed least-squares terms for one EPI, laid out `angles x len`.
///
/// `s_uv` and `s_uu` are sums of products of two Q values (twice the fraction
/// bits); `w_sum` is a sum of Q values.
#[derive(Debug, Clone)]
pub struct SlicePlanes {
    pub angles: usize,
    pub len: usize,
    pub s_uv: Vec<i128>,
    pub s_uu: Vec<i128>,
    pub w_sum: Vec<i128>,
}

impl SlicePlanes {
    /// Builds the planes from a raw EPI and its precomputed angular differences.
    ///
    /// The spatial gradient is the rounded central difference along the EPI
    /// width on channel 0, zero at both ends.
    pub fn build(
        epi: &ImageBlob,
        angular_diff: &ImageBlob,
        format: &FixedPointFormat,
        window: usize,
    ) -> Result<Self> {
        if epi.encoding() != SampleEncoding::FixedU24 || epi.channels() == 0 {
            return Err(EpiError::InvalidFormat(format!(
                "EPI must be fixed-point encoded, got encoding {} with {} channel(s)",
                epi.encoding().code(),
                epi.channels()
            )));
        }
        angular_diff.expect_layout("angular difference volume", SampleEncoding::FixedU24, 1)?;
        if angular_diff.width() != epi.width() || angular_diff.height() != epi.height() {
            return Err(EpiError::InvalidFormat(format!(
                "angular difference volume is {}x{} but EPI is {}x{}",
                angular_diff.width(),
                angular_diff.height(),
                epi.width(),
                epi.height()
            )));
        }

        let len = epi.width() as usize;
        let angles = epi.height() as usize;
        let size = angles * len;

        let mut p_uv = vec![0i128; size];
        let mut p_uu = vec![0i128; size];
        let mut w = vec![0i128; size];

        for a in 0..angles {
            for x in 0..len {
                let du = angular_diff.fixed_value(x, a, 0, format) as i128;
                let ds = if x > 0 && x + 1 < len {
                    let lm = epi.fixed_value(x - 1, a, 0, format);
                    let lp = epi.fixed_value(x + 1, a, 0, format);
                    round_half_div2(lp - lm) as i128
                } else {
                    0
                };

                let i = a * len + x;
                p_uv[i] = du * ds;
                p_uu[i] = du * du;
                w[i] = du.abs();
            }
        }

        Ok(Self {
            angles,
            len,
            s_uv: box_sum_2d(&p_uv, angles, len, window),
            s_uu: box_sum_2d(&p_uu, angles, len, window),
            w_sum: box_sum_2d(&w, angles, len, window),
        })
    }
}
