//! Frame loading module
//!
//! Sits outside the numeric core: turns a directory of container files into
//! ordered frame stacks and writes result blobs back out.

mod directory;
mod source;

#[cfg(test)]
mod tests;

pub use directory::{natural_cmp, save_blob, DirectoryFrameSource, DEFAULT_EXTENSION};
pub use source::FrameSource;
