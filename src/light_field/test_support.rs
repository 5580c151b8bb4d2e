//! Synthetic frames shared by the unit tests.

use crate::light_field::container::{ImageBlob, SampleEncoding};
use crate::light_field::fixed_point::{FixedPointFormat, write_u24};

pub(crate) const Q: FixedPointFormat = FixedPointFormat::q12_12();

/// Fixed-point RGB frame where `f(x, y, c)` gives the signed value.
pub(crate) fn fixed_rgb(w: u32, h: u32, f: impl Fn(usize, usize, usize) -> i64) -> ImageBlob {
    let mut payload = vec![0u8; (w * h) as usize * 9];
    for y in 0..h as usize {
        for x in 0..w as usize {
            for c in 0..3 {
                let o = ((y * w as usize + x) * 3 + c) * 3;
                write_u24(&mut payload, o, Q.bias(f(x, y, c)));
            }
        }
    }
    ImageBlob::new(w, h, 3, SampleEncoding::FixedU24, payload).unwrap()
}

/// 8-bit RGB frame where `f(x, y, c)` gives the sample.
pub(crate) fn u8_rgb(w: u32, h: u32, f: impl Fn(usize, usize, usize) -> u8) -> ImageBlob {
    let mut payload = Vec::with_capacity((w * h) as usize * 3);
    for y in 0..h as usize {
        for x in 0..w as usize {
            for c in 0..3 {
                payload.push(f(x, y, c));
            }
        }
    }
    ImageBlob::new(w, h, 3, SampleEncoding::U8, payload).unwrap()
}

/// Channel-0 signed values of a fixed-point blob, row-major.
pub(crate) fn values(blob: &ImageBlob) -> Vec<i64> {
    let mut out = Vec::with_capacity((blob.width() * blob.height()) as usize);
    for y in 0..blob.height() as usize {
        for x in 0..blob.width() as usize {
            out.push(blob.fixed_value(x, y, 0, &Q));
        }
    }
    out
}
