use std::fmt;

use thiserror::Error;

/// Which EPI family a slice belongs to. Horizontal slices are image rows,
/// vertical slices are image columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Horizontal => write!(f, "row"),
            Axis::Vertical => write!(f, "column"),
        }
    }
}

#[derive(Error, Debug)]
pub enum EpiError {
    #[error("Container truncated: {0} bytes, header needs 16")]
    Truncated(usize),

    #[error("Bad container magic: {0:?}")]
    BadMagic([u8; 4]),

    #[error("Unsupported sample encoding: {0}")]
    UnsupportedEncoding(u8),

    #[error("Payload size mismatch: got {actual}, expected {expected}")]
    PayloadSizeMismatch { expected: usize, actual: usize },

    #[error("Invalid input format: {0}")]
    InvalidFormat(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("{axis} {index}: {source}")]
    Slice {
        axis: Axis,
        index: usize,
        #[source]
        source: Box<EpiError>,
    },

    #[error("frame {index}: {source}")]
    Frame {
        index: usize,
        #[source]
        source: Box<EpiError>,
    },

    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl EpiError {
    /// True for malformed containers and violated stage preconditions,
    /// including when wrapped in slice context.
    pub fn is_format_error(&self) -> bool {
        match self {
            EpiError::Truncated(_)
            | EpiError::BadMagic(_)
            | EpiError::UnsupportedEncoding(_)
            | EpiError::PayloadSizeMismatch { .. }
            | EpiError::InvalidFormat(_) => true,
            EpiError::Slice { source, .. } | EpiError::Frame { source, .. } => {
                source.is_format_error()
            }
            _ => false,
        }
    }

    pub(crate) fn in_slice(self, axis: Axis, index: usize) -> Self {
        EpiError::Slice {
            axis,
            index,
            source: Box::new(self),
        }
    }

    pub(crate) fn in_frame(self, index: usize) -> Self {
        EpiError::Frame {
            index,
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, EpiError>;
