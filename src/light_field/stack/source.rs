use crate::light_field::common::error::Result;
use crate::light_field::epi::FrameStack;

/// Supplies ordered frame stacks to the pipeline.
pub trait FrameSource {
    /// Loads every frame whose name starts with `prefix`, in angular order.
    fn load_stack(&self, prefix: &str) -> Result<FrameStack>;
}
