//! Instruction-accelerated CRC32C engines
//!
//! A single hardware CRC step depends on the previous result, so one
//! accumulator is bounded by the instruction's latency. The engines here
//! cut each block into three lanes with independent accumulators, letting
//! the core overlap them, then merge the lanes with one carry-less
//! multiply and one CRC step per lane.
//!
//! Block layout, in 8-byte words:
//!
//! ```text
//! +------+-------------+-------------+-------------+---------+
//! | seed | lane 0 (L)  | lane 1 (L)  | lane 2 (L)  | trailer |
//! +------+-------------+-------------+-------------+---------+
//! ```
//!
//! The seed word folds the running CRC into lane 0. After the lanes,
//! lane 0 must still be shifted past lanes 1, 2 and the trailer, and lane 1
//! past lane 2 and the trailer. Multiplying by `x^(8n - 33) mod P` and
//! reducing with one CRC step over the 64-bit product performs an `n`-byte
//! shift, which is where the fold constants come from.

use crate::POLYNOMIAL;

#[cfg(target_arch = "aarch64")]
pub(crate) mod aarch64;

#[cfg(target_arch = "x86_64")]
pub(crate) mod x86_64;

/// Block and lane shape of a folding engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoldGeometry {
    /// Words per lane, excluding the seed word
    pub lane_words: usize,
}

impl FoldGeometry {
    /// Number of interleaved lanes
    pub const LANES: usize = 3;

    /// Total words per block: seed, three lanes, trailer
    pub const fn block_words(&self) -> usize {
        Self::LANES * self.lane_words + 2
    }

    /// Bytes consumed per block
    pub const fn block_len(&self) -> usize {
        self.block_words() * 8
    }

    /// Index of the trailing control word within a block
    pub const fn trailer_word(&self) -> usize {
        Self::LANES * self.lane_words + 1
    }

    /// Multiplier merging lane 0 (shifts past two lanes and the trailer)
    pub const fn k1(&self) -> u64 {
        shift_constant((2 * self.lane_words + 1) * 8)
    }

    /// Multiplier merging lane 1 (shifts past one lane and the trailer)
    pub const fn k2(&self) -> u64 {
        shift_constant((self.lane_words + 1) * 8)
    }
}

/// Reflected `x^(8 * bytes - 33) mod P`
///
/// Carry-less multiplying a 32-bit CRC by this value and running one
/// 64-bit CRC step over the product with a zero register gives the CRC
/// advanced through `bytes` zero bytes.
pub const fn shift_constant(bytes: usize) -> u64 {
    let exponent = bytes * 8 - 33;
    // x^0 in reflected form
    let mut value = 0x8000_0000u32;
    let mut i = 0;
    while i < exponent {
        value = if value & 1 != 0 {
            (value >> 1) ^ POLYNOMIAL
        } else {
            value >> 1
        };
        i += 1;
    }
    value as u64
}
