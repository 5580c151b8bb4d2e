use anyhow::{bail, Context};
use epi_disparity_rs::light_field::{KernelSize, LightFieldPipeline, PipelineConfig};
use epi_disparity_rs::logger;

use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        let program = args.first().map(String::as_str).unwrap_or("epi_disparity_rs");
        bail!("usage: {} <cross_dir> <output_dir> [kernel_size] [window]", program);
    }
    let input_dir = &args[1];
    let output_dir = &args[2];

    let mut builder = PipelineConfig::builder();
    if let Some(k) = args.get(3) {
        let side: usize = k.parse().with_context(|| format!("invalid kernel size '{}'", k))?;
        builder = builder.kernel(KernelSize::try_from(side)?);
    }
    if let Some(w) = args.get(4) {
        builder = builder.window(w.parse().with_context(|| format!("invalid window '{}'", w))?);
    }

    let pipeline = LightFieldPipeline::new(builder.build()).context("invalid configuration")?;

    info!("Starting epi_disparity...");
    info!("Kernel: {}x{}", pipeline.config().kernel.side(), pipeline.config().kernel.side());
    info!("Window: {}", pipeline.config().window);

    match pipeline.run_directory(input_dir, output_dir) {
        Ok(_) => info!("Disparity written to {}", output_dir),
        Err(e) => {
            error!("Run failed: {}", e);
            return Err(e).with_context(|| format!("processing {}", input_dir));
        }
    }

    Ok(())
}
