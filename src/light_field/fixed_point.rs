//! Fixed-point arithmetic module
//!
//! Signed Q-format values stored biased in 24-bit unsigned fields, plus the
//! rounding and wide-product primitives every stage shares.

mod arith;
mod format;

#[cfg(test)]
mod tests;

pub use arith::{clamp_q, floor_div, read_u24, round_div, round_half_div2, write_u24};
pub use format::{FixedPointFormat, U24_MAX};
pub(crate) use format::saturate_i64;
