use crate::light_field::common::error::{EpiError, Result};
use super::arith::{clamp_q, floor_div};

/// Largest value a packed 24-bit sample can hold.
pub const U24_MAX: u32 = (1 << 24) - 1;

const DEFAULT_FRAC_BITS: u32 = 12;
/// 2048.0 in Q12.12, the midpoint of the 24-bit range.
const DEFAULT_BIAS: i64 = 2048 << DEFAULT_FRAC_BITS;

/// Signed fixed-point representation stored biased in 24 unsigned bits.
///
/// The default is Q12.12 with bias 8,388,608, so signed values in
/// `[-2048.0, 2048.0)` map onto `[0, 2^24 - 1]`. Every stage receives the
/// format explicitly instead of relying on global constants.
///
/// Arithmetic works on `i64` values with `i128` intermediates, and saturates to
/// `i64` where a result could not be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedPointFormat {
    frac_bits: u32,
    bias: i64,
}

impl Default for FixedPointFormat {
    fn default() -> Self {
        Self::q12_12()
    }
}

impl FixedPointFormat {
    pub const fn q12_12() -> Self {
        Self {
            frac_bits: DEFAULT_FRAC_BITS,
            bias: DEFAULT_BIAS,
        }
    }

    /// Builds a custom format. `frac_bits` must be in `1..=23` and `bias` must
    /// fit the 24-bit storage range.
    pub fn new(frac_bits: u32, bias: i64) -> Result<Self> {
        if !(1..=23).contains(&frac_bits) {
            return Err(EpiError::InvalidConfig(format!(
                "fraction bits must be in 1..=23, got {}",
                frac_bits
            )));
        }
        if !(0..=U24_MAX as i64).contains(&bias) {
            return Err(EpiError::InvalidConfig(format!(
                "bias {} outside the 24-bit storage range",
                bias
            )));
        }
        Ok(Self { frac_bits, bias })
    }

    pub fn frac_bits(&self) -> u32 {
        self.frac_bits
    }

    pub fn bias_offset(&self) -> i64 {
        self.bias
    }

    /// Fixed-point representation of 1.0.
    pub fn one(&self) -> i64 {
        1 << self.frac_bits
    }

    /// Smallest positive representable value.
    pub fn lsb(&self) -> i64 {
        1
    }

    pub fn from_int(&self, v: i64) -> i64 {
        v << self.frac_bits
    }

    /// Nearest fixed-point value to `v`, ties away from zero.
    pub fn from_f64(&self, v: f64) -> i64 {
        (v * self.one() as f64).round() as i64
    }

    pub fn to_f64(&self, q: i64) -> f64 {
        q as f64 / self.one() as f64
    }

    /// Signed value to biased storage, saturating to `[0, 2^24 - 1]`.
    #[inline]
    pub fn bias(&self, signed: i64) -> u32 {
        clamp_q(signed.saturating_add(self.bias), 0, U24_MAX as i64) as u32
    }

    #[inline]
    pub fn unbias(&self, stored: u32) -> i64 {
        (stored & U24_MAX) as i64 - self.bias
    }

    /// Product renormalised by the fraction bits, rounding half away from zero.
    #[inline]
    pub fn mul(&self, a: i64, b: i64) -> i64 {
        let prod = a as i128 * b as i128;
        let half = 1i128 << (self.frac_bits - 1);
        let q = if prod >= 0 {
            (prod + half) >> self.frac_bits
        } else {
            -(((-prod) + half) >> self.frac_bits)
        };
        saturate_i64(q)
    }

    /// `num / den` in fixed point with rounding; 0 when `den == 0`.
    pub fn div(&self, num: i64, den: i64) -> i64 {
        if den == 0 {
            return 0;
        }
        let den = den as i128;
        let half = den >> 1;
        let q = if num >= 0 {
            floor_div(((num as i128) << self.frac_bits) + half, den)
        } else {
            -floor_div(((-(num as i128)) << self.frac_bits) + half, den)
        };
        saturate_i64(q)
    }

    /// `1 / den` in fixed point with rounding; 0 when `den == 0`.
    pub fn inv(&self, den: i64) -> i64 {
        if den == 0 {
            return 0;
        }
        let num = 1i128 << (2 * self.frac_bits);
        let den = den as i128;
        let q = if den > 0 {
            (num + (den >> 1)) / den
        } else {
            -((num + ((-den) >> 1)) / (-den))
        };
        saturate_i64(q)
    }

    /// Integer power by repeated squaring, renormalising after every multiply.
    /// Non-positive exponents give one.
    pub fn pow_int(&self, base: i64, exp: i32) -> i64 {
        if exp <= 0 {
            return self.one();
        }
        if exp == 1 {
            return base;
        }
        let mut result = self.one();
        let mut b = base;
        let mut e = exp;
        while e > 0 {
            if e & 1 == 1 {
                result = self.mul(result, b);
            }
            e >>= 1;
            if e > 0 {
                b = self.mul(b, b);
            }
        }
        result
    }

    pub fn clamp(&self, x: i64, lo: i64, hi: i64) -> i64 {
        clamp_q(x, lo, hi)
    }
}

/// Narrows a wide intermediate to `i64`, saturating at the bounds.
#[inline]
pub(crate) fn saturate_i64(v: i128) -> i64 {
    v.clamp(i64::MIN as i128, i64::MAX as i128) as i64
}
