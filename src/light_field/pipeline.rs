//! Pipeline orchestration module

mod runner;
pub mod types;


pub use crate::light_field::disparity::{Calibration, FusionParams};
pub use runner::LightFieldPipeline;
pub use types::{PipelineConfig, PipelineConfigBuilder, PipelineOutput};
