//! Light-field disparity pipeline module
//!
//! Fixed-point core that turns a cross of sub-aperture views into a disparity map:
//! container codec, Q12.12 arithmetic, low-pass filtering, EPI assembly, confidence
//! and disparity estimation. Directory loading and orchestration sit on top.

pub mod common;
pub mod container;
pub mod fixed_point;
pub mod lowpass;
pub mod epi;
pub mod confidence;
pub mod disparity;
pub mod stack;
pub mod pipeline;

#[cfg(test)]
pub(crate) mod test_support;

pub use common::{
    Axis,
    EpiError,
    Result,
};

pub use container::{
    ImageBlob,
    SampleEncoding,
    HEADER_LEN,
    MAGIC,
};

pub use fixed_point::FixedPointFormat;

pub use lowpass::{
    KernelSize,
    LowPassFilter,
};

pub use epi::{
    EpiSet,
    FrameStack,
};

pub use confidence::{
    ConfidenceEstimator,
    ConfidenceMaps,
};

pub use disparity::{
    DisparityEstimator,
    FixedPointDisparity,
    ReferenceDisparity,
};

pub use stack::{
    DirectoryFrameSource,
    FrameSource,
};

pub use pipeline::{
    Calibration,
    FusionParams,
    LightFieldPipeline,
    PipelineConfig,
    PipelineConfigBuilder,
    PipelineOutput,
};
