//! Container data types

use crate::light_field::common::error::{EpiError, Result};
use crate::light_field::fixed_point::{FixedPointFormat, read_u24, write_u24};
use super::codec::{encode_header, HEADER_LEN};

/// Sample encoding stored at header offset 13.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SampleEncoding {
    /// 8-bit unsigned integer
    U8 = 1,
    /// 16-bit unsigned integer, little-endian
    U16 = 2,
    /// 32-bit float (reserved, never produced by the core)
    F32 = 3,
    /// 24-bit packed unsigned integer holding a biased signed fixed-point value
    FixedU24 = 4,
}

impl SampleEncoding {
    pub const fn bytes_per_sample(self) -> usize {
        match self {
            SampleEncoding::U8 => 1,
            SampleEncoding::U16 => 2,
            SampleEncoding::F32 => 4,
            SampleEncoding::FixedU24 => 3,
        }
    }

    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for SampleEncoding {
    type Error = EpiError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            1 => Ok(SampleEncoding::U8),
            2 => Ok(SampleEncoding::U16),
            3 => Ok(SampleEncoding::F32),
            4 => Ok(SampleEncoding::FixedU24),
            other => Err(EpiError::UnsupportedEncoding(other)),
        }
    }
}

/// A decoded container: geometry, encoding and the raw payload.
///
/// Construction always checks that the payload length matches
/// `width * height * channels * bytes_per_sample`, so a blob in hand is
/// well formed. Blobs are never edited after a stage returns them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBlob {
    width: u32,
    height: u32,
    channels: u8,
    encoding: SampleEncoding,
    payload: Vec<u8>,
}

impl ImageBlob {
    pub fn new(
        width: u32,
        height: u32,
        channels: u8,
        encoding: SampleEncoding,
        payload: Vec<u8>,
    ) -> Result<Self> {
        let expected = expected_payload_len(width, height, channels, encoding)?;
        if payload.len() != expected {
            return Err(EpiError::PayloadSizeMismatch {
                expected,
                actual: payload.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            encoding,
            payload,
        })
    }

    /// Single-channel fixed-point map from signed values in row-major order.
    pub fn from_fixed_values(
        width: u32,
        height: u32,
        values: &[i64],
        format: &FixedPointFormat,
    ) -> Result<Self> {
        let mut payload = vec![0u8; values.len() * 3];
        for (i, &v) in values.iter().enumerate() {
            write_u24(&mut payload, i * 3, format.bias(v));
        }
        Self::new(width, height, 1, SampleEncoding::FixedU24, payload)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn encoding(&self) -> SampleEncoding {
        self.encoding
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.channels as usize * self.encoding.bytes_per_sample()
    }

    pub fn row_bytes(&self) -> usize {
        self.width as usize * self.bytes_per_pixel()
    }

    pub fn same_geometry(&self, other: &ImageBlob) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.channels == other.channels
            && self.encoding == other.encoding
    }

    /// Fails with `InvalidFormat` unless the blob has the given encoding and
    /// channel count. `what` names the input in the message.
    pub fn expect_layout(&self, what: &str, encoding: SampleEncoding, channels: u8) -> Result<()> {
        if self.encoding != encoding || self.channels != channels {
            return Err(EpiError::InvalidFormat(format!(
                "{} must be encoding {} with {} channel(s), got encoding {} with {} channel(s)",
                what,
                encoding.code(),
                channels,
                self.encoding.code(),
                self.channels
            )));
        }
        Ok(())
    }

    /// Decoded signed value of sample `channel` at pixel `(x, y)`.
    /// Only meaningful for `FixedU24` blobs.
    #[inline]
    pub fn fixed_value(&self, x: usize, y: usize, channel: usize, format: &FixedPointFormat) -> i64 {
        let offset = (y * self.width as usize + x) * self.bytes_per_pixel() + channel * 3;
        format.unbias(read_u24(&self.payload, offset))
    }

    /// Serialises header and payload.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_LEN + self.payload.len());
        out.extend_from_slice(&encode_header(self.width, self.height, self.channels, self.encoding));
        out.extend_from_slice(&self.payload);
        out
    }
}

/// Channel counts a container may declare.
pub const VALID_CHANNELS: [u8; 3] = [1, 3, 4];

/// Payload length implied by a header, rejecting channel counts outside
/// [`VALID_CHANNELS`] and geometry whose byte count does not fit `usize`.
pub(crate) fn expected_payload_len(
    width: u32,
    height: u32,
    channels: u8,
    encoding: SampleEncoding,
) -> Result<usize> {
    if !VALID_CHANNELS.contains(&channels) {
        return Err(EpiError::InvalidFormat(format!(
            "channel count must be 1, 3 or 4, got {}",
            channels
        )));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(channels as usize))
        .and_then(|n| n.checked_mul(encoding.bytes_per_sample()))
        .ok_or_else(|| {
            EpiError::InvalidFormat(format!(
                "{}x{}x{} geometry overflows the payload size",
                width, height, channels
            ))
        })
}
