use std::path::Path;

use tracing::{info, instrument, warn};

use crate::light_field::common::error::{Axis, EpiError, Result};
use crate::light_field::confidence::{fuse_avg, ConfidenceEstimator};
use crate::light_field::disparity::{DisparityEstimator, FixedPointDisparity};
use crate::light_field::epi::{build_epis, FrameStack};
use crate::light_field::lowpass::LowPassFilter;
use crate::light_field::stack::{DirectoryFrameSource, FrameSource};
use super::types::{PipelineConfig, PipelineOutput};

/// Low-pass, EPI assembly, confidence, per-axis disparity and fusion over
/// one horizontal and one vertical frame stack.
pub struct LightFieldPipeline<E: DisparityEstimator> {
    estimator: E,
    config: PipelineConfig,
}

impl LightFieldPipeline<FixedPointDisparity> {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let estimator = FixedPointDisparity::new(config.format);
        Self::with_custom(estimator, config)
    }
}

impl<E: DisparityEstimator> LightFieldPipeline<E> {
    pub fn with_custom(estimator: E, config: PipelineConfig) -> Result<Self> {
        Self::check(&estimator, &config)?;
        Ok(Self { estimator, config })
    }

    fn check(estimator: &E, config: &PipelineConfig) -> Result<()> {
        config.validate()?;
        if *estimator.format() != config.format {
            return Err(EpiError::InvalidConfig(format!(
                "estimator uses Q{} with bias {}, configuration uses Q{} with bias {}",
                estimator.format().frac_bits(),
                estimator.format().bias_offset(),
                config.format.frac_bits(),
                config.format.bias_offset()
            )));
        }
        Ok(())
    }

    /// Runs every stage on raw 8-bit RGB stacks.
    #[instrument(skip_all, fields(h_frames = h_raw.len(), v_frames = v_raw.len()))]
    pub fn run(&self, h_raw: &FrameStack, v_raw: &FrameStack) -> Result<PipelineOutput> {
        let cfg = &self.config;
        info!(
            width = h_raw.width(),
            height = h_raw.height(),
            kernel = cfg.kernel.side(),
            window = cfg.window,
            "Starting light-field run"
        );
        if h_raw.len() < 3 || v_raw.len() < 3 {
            warn!(
                h_frames = h_raw.len(),
                v_frames = v_raw.len(),
                "Fewer than three views on an axis, its confidence will be zero"
            );
        }

        let (h_filtered, v_filtered) = {
            let _span = tracing::info_span!("low_pass", kernel = cfg.kernel.side()).entered();
            let filter = LowPassFilter::new(cfg.kernel, cfg.format);
            (filter.apply_stack(h_raw)?, filter.apply_stack(v_raw)?)
        };

        let epis = {
            let _span = tracing::info_span!("build_epis").entered();
            build_epis(&h_filtered, &v_filtered)?
        };

        let (confidence, c_avg) = {
            let _span = tracing::info_span!("confidence", channel = cfg.channel).entered();
            let maps = ConfidenceEstimator::new(cfg.format, cfg.channel).estimate(&epis)?;
            let avg = fuse_avg(&maps.horizontal, &maps.vertical, &cfg.format)?;
            (maps, avg)
        };

        let (z_h, z_v) = {
            let _span = tracing::info_span!("disparity", window = cfg.window).entered();
            let z_h = self.estimator.estimate_axis(
                Axis::Horizontal,
                &epis.horizontal,
                &confidence.du_h,
                epis.width,
                epis.height,
                &cfg.calibration,
                cfg.window,
            )?;
            let z_v = self.estimator.estimate_axis(
                Axis::Vertical,
                &epis.vertical,
                &confidence.dv_v,
                epis.width,
                epis.height,
                &cfg.calibration,
                cfg.window,
            )?;
            (z_h, z_v)
        };

        let z_conf = {
            let _span = tracing::info_span!("fusion", temperature = cfg.fusion.temperature).entered();
            self.estimator.fuse(
                &z_h,
                &z_v,
                &confidence.horizontal,
                &confidence.vertical,
                &cfg.fusion,
            )?
        };

        info!("Light-field run complete");
        Ok(PipelineOutput {
            confidence,
            c_avg,
            z_h,
            z_v,
            z_conf,
        })
    }

    /// Loads both stacks through `source` using the configured prefixes.
    pub fn run_source(&self, source: &dyn FrameSource) -> Result<PipelineOutput> {
        let h_raw = source.load_stack(&self.config.horizontal_prefix)?;
        let v_raw = source.load_stack(&self.config.vertical_prefix)?;
        self.run(&h_raw, &v_raw)
    }

    /// Reads the cross of views from `input_dir` and writes every map under
    /// `output_dir`.
    pub fn run_directory<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_dir: P,
        output_dir: Q,
    ) -> Result<PipelineOutput> {
        let input_dir = input_dir.as_ref();
        let output_dir = output_dir.as_ref();
        info!(
            "Processing light field: {} -> {}",
            input_dir.display(),
            output_dir.display()
        );

        let output = self.run_source(&DirectoryFrameSource::new(input_dir))?;
        {
            let _span = tracing::info_span!("save_outputs").entered();
            output.save(output_dir)?;
        }
        Ok(output)
    }

    pub fn estimator(&self) -> &E {
        &self.estimator
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: PipelineConfig) -> Result<()> {
        Self::check(&self.estimator, &config)?;
        self.config = config;
        Ok(())
    }
}
