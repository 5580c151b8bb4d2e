//! Pipeline configuration and output types

use std::path::Path;

use crate::light_field::common::error::{EpiError, Result};
use crate::light_field::confidence::ConfidenceMaps;
use crate::light_field::container::ImageBlob;
use crate::light_field::disparity::{Calibration, FusionParams};
use crate::light_field::fixed_point::FixedPointFormat;
use crate::light_field::lowpass::KernelSize;
use crate::light_field::stack::save_blob;

/// Channels of a low-pass filtered frame.
const FILTERED_CHANNELS: usize = 3;

/// Configuration for a full light-field run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Fixed-point representation shared by every stage
    pub format: FixedPointFormat,
    /// Low-pass kernel footprint
    pub kernel: KernelSize,
    /// Channel the confidence stage reads
    pub channel: usize,
    /// Box-sum window of the disparity fit
    pub window: usize,
    pub calibration: Calibration,
    pub fusion: FusionParams,
    /// File-name prefix of the horizontal views when loading from a directory
    pub horizontal_prefix: String,
    /// File-name prefix of the vertical views when loading from a directory
    pub vertical_prefix: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let format = FixedPointFormat::default();
        Self {
            format,
            kernel: KernelSize::K7,
            channel: 0,
            window: 5,
            calibration: Calibration::unit(&format),
            fusion: FusionParams::defaults_for(&format),
            horizontal_prefix: "h_".to_string(),
            vertical_prefix: "v_".to_string(),
        }
    }
}

impl PipelineConfig {
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    pub fn validate(&self) -> Result<()> {
        if self.window == 0 {
            return Err(EpiError::InvalidConfig("window must be at least 1".to_string()));
        }
        if self.channel >= FILTERED_CHANNELS {
            return Err(EpiError::InvalidConfig(format!(
                "confidence channel {} out of range, frames have {} channels",
                self.channel, FILTERED_CHANNELS
            )));
        }
        if self.horizontal_prefix.is_empty()
            || self.vertical_prefix.is_empty()
            || self.horizontal_prefix == self.vertical_prefix
        {
            return Err(EpiError::InvalidConfig(format!(
                "frame prefixes must be distinct and non-empty, got '{}' and '{}'",
                self.horizontal_prefix, self.vertical_prefix
            )));
        }
        self.fusion.validate()
    }
}

/// Builder for PipelineConfig
///
/// Calibration and fusion parameters left unset follow the chosen format,
/// so a custom format gets a matching unit calibration.
#[derive(Default)]
pub struct PipelineConfigBuilder {
    format: Option<FixedPointFormat>,
    kernel: Option<KernelSize>,
    channel: Option<usize>,
    window: Option<usize>,
    calibration: Option<Calibration>,
    fusion: Option<FusionParams>,
    horizontal_prefix: Option<String>,
    vertical_prefix: Option<String>,
}

impl PipelineConfigBuilder {
    pub fn format(mut self, format: FixedPointFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn kernel(mut self, kernel: KernelSize) -> Self {
        self.kernel = Some(kernel);
        self
    }

    pub fn channel(mut self, channel: usize) -> Self {
        self.channel = Some(channel);
        self
    }

    pub fn window(mut self, window: usize) -> Self {
        self.window = Some(window);
        self
    }

    pub fn calibration(mut self, calibration: Calibration) -> Self {
        self.calibration = Some(calibration);
        self
    }

    pub fn fusion(mut self, fusion: FusionParams) -> Self {
        self.fusion = Some(fusion);
        self
    }

    pub fn prefixes(mut self, horizontal: &str, vertical: &str) -> Self {
        self.horizontal_prefix = Some(horizontal.to_string());
        self.vertical_prefix = Some(vertical.to_string());
        self
    }

    pub fn build(self) -> PipelineConfig {
        let default = PipelineConfig::default();
        let format = self.format.unwrap_or(default.format);
        PipelineConfig {
            format,
            kernel: self.kernel.unwrap_or(default.kernel),
            channel: self.channel.unwrap_or(default.channel),
            window: self.window.unwrap_or(default.window),
            calibration: self.calibration.unwrap_or_else(|| Calibration::unit(&format)),
            fusion: self.fusion.unwrap_or_else(|| FusionParams::defaults_for(&format)),
            horizontal_prefix: self.horizontal_prefix.unwrap_or(default.horizontal_prefix),
            vertical_prefix: self.vertical_prefix.unwrap_or(default.vertical_prefix),
        }
    }
}

/// Every map a run produces, all image sized with one fixed-point channel.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub confidence: ConfidenceMaps,
    pub c_avg: ImageBlob,
    pub z_h: ImageBlob,
    pub z_v: ImageBlob,
    pub z_conf: ImageBlob,
}

impl PipelineOutput {
    /// Writes `confidence/{C_h,C_v,C_avg}.imgb` and
    /// `disparity/{Z_h,Z_v,Z_conf}.imgb` under `out_dir`.
    pub fn save<P: AsRef<Path>>(&self, out_dir: P) -> Result<()> {
        let out_dir = out_dir.as_ref();
        let conf_dir = out_dir.join("confidence");
        let disp_dir = out_dir.join("disparity");

        save_blob(conf_dir.join("C_h.imgb"), &self.confidence.horizontal)?;
        save_blob(conf_dir.join("C_v.imgb"), &self.confidence.vertical)?;
        save_blob(conf_dir.join("C_avg.imgb"), &self.c_avg)?;
        save_blob(disp_dir.join("Z_h.imgb"), &self.z_h)?;
        save_blob(disp_dir.join("Z_v.imgb"), &self.z_v)?;
        save_blob(disp_dir.join("Z_conf.imgb"), &self.z_conf)?;
        Ok(())
    }
}
