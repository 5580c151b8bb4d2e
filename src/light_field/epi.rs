//! EPI assembly module
//!
//! Rearranges two ordered frame stacks into per-row and per-column
//! epipolar-plane volumes.

mod builder;
pub mod types;

#[cfg(test)]
mod tests;

pub use builder::{build_epis, horizontal_epi, vertical_epi};
pub use types::{EpiSet, FrameStack};
