//! Confidence estimation module
//!
//! Texture confidence per axis from angular differences across each EPI.

mod estimator;


pub use estimator::{fuse_avg, ConfidenceEstimator, ConfidenceMaps};
