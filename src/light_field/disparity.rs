//! Disparity estimation module
//!
//! Structure-tensor style slope estimation on EPIs, per axis, followed by a
//! confidence-weighted fusion of the two axis maps. Two solvers share the
//! [`DisparityEstimator`] interface: an integer-only one and an `f64`
//! reference.

mod box_sum;
mod estimator;
mod fixed;
mod planes;
mod reference;
pub mod types;


pub use box_sum::box_sum_2d;
pub use estimator::DisparityEstimator;
pub use fixed::FixedPointDisparity;
pub use planes::SlicePlanes;
pub use reference::ReferenceDisparity;
pub use types::{AxisCalibration, Calibration, FusionParams};
