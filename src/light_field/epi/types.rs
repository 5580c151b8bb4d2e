//! Frame stack and EPI volume types

use crate::light_field::common::error::{EpiError, Result};
use crate::light_field::container::ImageBlob;

/// Ordered sub-aperture frames, one per angular sample.
///
/// The order is supplied by the caller; nothing here sorts or reads files.
/// All frames share width, height, channel count and encoding.
#[derive(Debug, Clone)]
pub struct FrameStack {
    frames: Vec<ImageBlob>,
}

impl FrameStack {
    pub fn new(frames: Vec<ImageBlob>) -> Result<Self> {
        let first = frames
            .first()
            .ok_or_else(|| EpiError::InvalidFormat("frame stack is empty".to_string()))?;

        if let Some((i, odd)) = frames
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, f)| !f.same_geometry(first))
        {
            return Err(EpiError::InvalidFormat(format!(
                "frame {} is {}x{}x{} (encoding {}), expected {}x{}x{} (encoding {})",
                i,
                odd.width(),
                odd.height(),
                odd.channels(),
                odd.encoding().code(),
                first.width(),
                first.height(),
                first.channels(),
                first.encoding().code()
            )));
        }

        Ok(Self { frames })
    }

    /// Number of angular samples.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn first(&self) -> &ImageBlob {
        &self.frames[0]
    }

    pub fn width(&self) -> u32 {
        self.first().width()
    }

    pub fn height(&self) -> u32 {
        self.first().height()
    }

    pub fn frames(&self) -> &[ImageBlob] {
        &self.frames
    }

    pub fn into_frames(self) -> Vec<ImageBlob> {
        self.frames
    }
}

/// Horizontal and vertical EPI volumes for one capture.
///
/// `horizontal[y]` has shape `U x width` and `vertical[x]` has shape
/// `V x height`, both with the frames' channel count and encoding.
#[derive(Debug, Clone)]
pub struct EpiSet {
    pub width: u32,
    pub height: u32,
    pub horizontal: Vec<ImageBlob>,
    pub vertical: Vec<ImageBlob>,
}

impl EpiSet {
    /// Angular sample count of the horizontal stack.
    pub fn angular_h(&self) -> usize {
        self.horizontal.first().map_or(0, |e| e.height() as usize)
    }

    /// Angular sample count of the vertical stack.
    pub fn angular_v(&self) -> usize {
        self.vertical.first().map_or(0, |e| e.height() as usize)
    }
}
