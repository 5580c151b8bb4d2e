use tracing::trace;

use crate::light_field::common::error::{EpiError, Result};
use super::types::{expected_payload_len, ImageBlob, SampleEncoding};

pub const MAGIC: [u8; 4] = *b"IMGB";
pub const HEADER_LEN: usize = 16;

pub(crate) fn encode_header(
    width: u32,
    height: u32,
    channels: u8,
    encoding: SampleEncoding,
) -> [u8; HEADER_LEN] {
    let mut hdr = [0u8; HEADER_LEN];
    hdr[0..4].copy_from_slice(&MAGIC);
    hdr[4..8].copy_from_slice(&width.to_le_bytes());
    hdr[8..12].copy_from_slice(&height.to_le_bytes());
    hdr[12] = channels;
    hdr[13] = encoding.code();
    // 14..16 reserved, always zero on write
    hdr
}

struct Header {
    width: u32,
    height: u32,
    channels: u8,
    encoding: SampleEncoding,
}

fn decode_header(buf: &[u8]) -> Result<Header> {
    if buf.len() < HEADER_LEN {
        return Err(EpiError::Truncated(buf.len()));
    }
    let magic: [u8; 4] = [buf[0], buf[1], buf[2], buf[3]];
    if magic != MAGIC {
        return Err(EpiError::BadMagic(magic));
    }
    let width = u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
    let height = u32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]);
    let channels = buf[12];
    let encoding = SampleEncoding::try_from(buf[13])?;

    let expected = expected_payload_len(width, height, channels, encoding)?;
    let actual = buf.len() - HEADER_LEN;
    if actual != expected {
        return Err(EpiError::PayloadSizeMismatch { expected, actual });
    }

    Ok(Header {
        width,
        height,
        channels,
        encoding,
    })
}

/// Decodes a container buffer. The reserved field is not checked.
pub fn parse(buf: &[u8]) -> Result<ImageBlob> {
    let hdr = decode_header(buf)?;
    trace!(
        width = hdr.width,
        height = hdr.height,
        channels = hdr.channels,
        encoding = hdr.encoding.code(),
        "Parsed container"
    );
    ImageBlob::new(
        hdr.width,
        hdr.height,
        hdr.channels,
        hdr.encoding,
        buf[HEADER_LEN..].to_vec(),
    )
}

/// Encodes a container buffer, rejecting payloads that disagree with the geometry.
pub fn make(
    width: u32,
    height: u32,
    channels: u8,
    encoding: SampleEncoding,
    payload: &[u8],
) -> Result<Vec<u8>> {
    let expected = expected_payload_len(width, height, channels, encoding)?;
    if payload.len() != expected {
        return Err(EpiError::PayloadSizeMismatch {
            expected,
            actual: payload.len(),
        });
    }
    let mut out = Vec::with_capacity(HEADER_LEN + payload.len());
    out.extend_from_slice(&encode_header(width, height, channels, encoding));
    out.extend_from_slice(payload);
    Ok(out)
}

/// Borrows the payload of a container buffer after validating its header.
pub fn payload_view(buf: &[u8]) -> Result<&[u8]> {
    decode_header(buf)?;
    Ok(&buf[HEADER_LEN..])
}
