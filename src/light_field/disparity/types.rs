use crate::light_field::common::error::{Axis, EpiError, Result};
use crate::light_field::fixed_point::FixedPointFormat;

/// Camera calibration terms, all fixed-point values.
///
/// `d` is the baseline, `ds`/`dt` the spatial sample spacing and `du`/`dv` the
/// angular sample spacing of the horizontal and vertical axis respectively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calibration {
    pub d: i64,
    pub ds: i64,
    pub dt: i64,
    pub du: i64,
    pub dv: i64,
}

impl Default for Calibration {
    fn default() -> Self {
        Self::unit(&FixedPointFormat::default())
    }
}

impl Calibration {
    /// Every term equal to 1.0 in `format`.
    pub fn unit(format: &FixedPointFormat) -> Self {
        let one = format.one();
        Self {
            d: one,
            ds: one,
            dt: one,
            du: one,
            dv: one,
        }
    }

    /// Terms relevant to one axis.
    pub fn for_axis(&self, axis: Axis) -> AxisCalibration {
        match axis {
            Axis::Horizontal => AxisCalibration {
                baseline: self.d,
                spatial: self.ds,
                angular: self.du,
            },
            Axis::Vertical => AxisCalibration {
                baseline: self.d,
                spatial: self.dt,
                angular: self.dv,
            },
        }
    }
}

/// Calibration projected onto a single axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisCalibration {
    pub baseline: i64,
    pub spatial: i64,
    pub angular: i64,
}

/// Confidence-weighted fusion parameters.
///
/// Confidence is clamped to `[floor, cap]` before being raised to
/// `temperature`; `eps` keeps the denominator away from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FusionParams {
    pub temperature: u32,
    pub floor: i64,
    pub cap: i64,
    pub eps: i64,
}

impl Default for FusionParams {
    fn default() -> Self {
        Self::defaults_for(&FixedPointFormat::default())
    }
}

impl FusionParams {
    /// Temperature 4, floor and eps of one LSB, cap of 1.0.
    pub fn defaults_for(format: &FixedPointFormat) -> Self {
        Self {
            temperature: 4,
            floor: format.lsb(),
            cap: format.one(),
            eps: format.lsb(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.floor < 0 {
            return Err(EpiError::InvalidConfig(format!(
                "fusion floor must be non-negative, got {}",
                self.floor
            )));
        }
        if self.cap < self.floor {
            return Err(EpiError::InvalidConfig(format!(
                "fusion cap {} is below floor {}",
                self.cap, self.floor
            )));
        }
        if self.eps < 0 {
            return Err(EpiError::InvalidConfig(format!(
                "fusion eps must be non-negative, got {}",
                self.eps
            )));
        }
        if self.temperature > i32::MAX as u32 {
            return Err(EpiError::InvalidConfig(format!(
                "fusion temperature {} too large",
                self.temperature
            )));
        }
        Ok(())
    }
}
