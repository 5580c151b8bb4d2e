//! Integer low-pass kernels

use crate::light_field::common::error::{EpiError, Result};

#[rustfmt::skip]
const KERNEL_3: [u32; 9] = [
    1, 2, 1,
    2, 4, 2,
    1, 2, 1,
];

#[rustfmt::skip]
const KERNEL_5: [u32; 25] = [
    1, 2, 2, 2, 1,
    2, 4, 4, 4, 2,
    2, 4, 4, 4, 2,
    2, 4, 4, 4, 2,
    1, 2, 2, 2, 1,
];

#[rustfmt::skip]
const KERNEL_7: [u32; 49] = [
    1, 1, 2, 2, 2, 1, 1,
    1, 2, 4, 4, 4, 2, 1,
    2, 4, 4, 4, 4, 4, 2,
    2, 4, 4, 4, 4, 4, 2,
    2, 4, 4, 4, 4, 4, 2,
    1, 2, 4, 4, 4, 2, 1,
    1, 1, 2, 2, 2, 1, 1,
];

/// Supported kernel footprints. Weights are powers of two and every kernel
/// sums to a power of two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelSize {
    /// 3x3, sum 16
    K3,
    /// 5x5, sum 64
    K5,
    /// 7x7, sum 128
    K7,
}

impl KernelSize {
    pub const fn side(self) -> usize {
        match self {
            KernelSize::K3 => 3,
            KernelSize::K5 => 5,
            KernelSize::K7 => 7,
        }
    }

    pub const fn radius(self) -> isize {
        (self.side() / 2) as isize
    }

    /// Row-major weights, `side * side` entries.
    pub fn weights(self) -> &'static [u32] {
        match self {
            KernelSize::K3 => &KERNEL_3,
            KernelSize::K5 => &KERNEL_5,
            KernelSize::K7 => &KERNEL_7,
        }
    }

    pub const fn normalization(self) -> u32 {
        match self {
            KernelSize::K3 => 16,
            KernelSize::K5 => 64,
            KernelSize::K7 => 128,
        }
    }
}

impl TryFrom<usize> for KernelSize {
    type Error = EpiError;

    fn try_from(side: usize) -> Result<Self> {
        match side {
            3 => Ok(KernelSize::K3),
            5 => Ok(KernelSize::K5),
            7 => Ok(KernelSize::K7),
            other => Err(EpiError::InvalidConfig(format!(
                "kernel size must be 3, 5 or 7, got {}",
                other
            ))),
        }
    }
}

/// Mirrors `i` into `[0, n)` without repeating the edge sample
/// (`-1 -> 1`, `n -> n - 2`), folding repeatedly for far-out indices.
/// A single-sample axis maps everything to 0.
pub fn reflect_index(i: isize, n: usize) -> usize {
    if n <= 1 {
        return 0;
    }
    let n = n as isize;
    let mut i = i;
    while i < 0 || i >= n {
        if i < 0 {
            i = -i;
        } else {
            i = 2 * n - 2 - i;
        }
    }
    i as usize
}
