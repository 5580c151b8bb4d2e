use super::format::U24_MAX;

/// Reads a little-endian 24-bit sample at `offset`.
#[inline]
pub fn read_u24(buf: &[u8], offset: usize) -> u32 {
    buf[offset] as u32 | (buf[offset + 1] as u32) << 8 | (buf[offset + 2] as u32) << 16
}

/// Writes the low 24 bits of `value` little-endian at `offset`.
#[inline]
pub fn write_u24(buf: &mut [u8], offset: usize, value: u32) {
    let v = value & U24_MAX;
    buf[offset] = (v & 0xFF) as u8;
    buf[offset + 1] = ((v >> 8) & 0xFF) as u8;
    buf[offset + 2] = ((v >> 16) & 0xFF) as u8;
}

/// Halves a signed value, rounding to nearest with ties away from zero.
#[inline]
pub fn round_half_div2(x: i64) -> i64 {
    if x >= 0 {
        (x + 1) >> 1
    } else {
        -(((-x) + 1) >> 1)
    }
}

/// Clamps without panicking when `lo > hi` (the low bound is checked first).
#[inline]
pub fn clamp_q(x: i64, lo: i64, hi: i64) -> i64 {
    if x < lo {
        lo
    } else if x > hi {
        hi
    } else {
        x
    }
}

/// Quotient rounded toward negative infinity for any divisor sign.
#[inline]
pub fn floor_div(num: i128, den: i128) -> i128 {
    let q = num / den;
    if num % den != 0 && ((num < 0) != (den < 0)) {
        q - 1
    } else {
        q
    }
}

/// `num / den` rounded to nearest, ties away from zero. `den` must be positive.
#[inline]
pub fn round_div(num: i128, den: i128) -> i128 {
    debug_assert!(den > 0);
    let half = den >> 1;
    if num >= 0 {
        (num + half) / den
    } else {
        -(((-num) + half) / den)
    }
}
