//! Low-pass filtering module
//!
//! Integer convolution applied to raw 8-bit frames before EPI construction.

mod filter;
pub mod kernel;


pub use filter::LowPassFilter;
pub use kernel::{reflect_index, KernelSize};
