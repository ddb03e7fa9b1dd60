//! x86_64 CRC32C engine: SSE4.2 `crc32` + PCLMULQDQ lane merge
//!
//! `crc32 r64` has 3-cycle latency and single-cycle throughput on every
//! core that implements it, so three lanes keep the unit busy. Lanes stay
//! at 42 words so a block fits comfortably in L1 next to the caller's
//! buffer; the fold constants are derived from that choice.

// Intrinsics require unsafe; callers are gated on runtime detection.
#![allow(unsafe_code)]

use core::arch::x86_64::{
    _mm_clmulepi64_si128, _mm_crc32_u16, _mm_crc32_u32, _mm_crc32_u64, _mm_crc32_u8,
    _mm_cvtsi128_si64, _mm_cvtsi64_si128,
};

use super::FoldGeometry;

/// Three lanes of 42 words per 1 KiB block
pub(crate) const GEOMETRY: FoldGeometry = FoldGeometry { lane_words: 42 };

const BLOCK_LEN: usize = GEOMETRY.block_len();
const LANE_WORDS: usize = GEOMETRY.lane_words;
const TRAILER: usize = GEOMETRY.trailer_word();
const K1: u64 = GEOMETRY.k1();
const K2: u64 = GEOMETRY.k2();

/// Returns `true` if the running CPU has SSE4.2 and PCLMULQDQ
#[cfg(feature = "std")]
#[inline]
pub(crate) fn is_supported() -> bool {
    std::arch::is_x86_feature_detected!("sse4.2") && std::arch::is_x86_feature_detected!("pclmulqdq")
}

/// Returns `true` if the build targets SSE4.2 and PCLMULQDQ
#[cfg(not(feature = "std"))]
#[inline]
pub(crate) fn is_supported() -> bool {
    cfg!(all(target_feature = "sse4.2", target_feature = "pclmulqdq"))
}

#[inline]
#[target_feature(enable = "sse4.2")]
unsafe fn crc_word(crc: u32, word: &[u8; 8]) -> u32 {
    _mm_crc32_u64(crc as u64, u64::from_le_bytes(*word)) as u32
}

/// Low 64 bits of the carry-less product of two 32-bit values
#[inline]
#[target_feature(enable = "pclmulqdq")]
unsafe fn clmul(a: u32, b: u64) -> u64 {
    let product = _mm_clmulepi64_si128(
        _mm_cvtsi64_si128(a as i64),
        _mm_cvtsi64_si128(b as i64),
        0x00,
    );
    _mm_cvtsi128_si64(product) as u64
}

/// Word steps, then at most one 4-, 2- and 1-byte step
///
/// # Safety
///
/// Caller must ensure SSE4.2 is available.
#[target_feature(enable = "sse4.2")]
unsafe fn update_serial_raw(mut crc: u32, data: &[u8]) -> u32 {
    let (words, mut rest) = data.as_chunks::<8>();
    for word in words {
        crc = crc_word(crc, word);
    }

    if let Some((word, tail)) = rest.split_first_chunk::<4>() {
        crc = _mm_crc32_u32(crc, u32::from_le_bytes(*word));
        rest = tail;
    }
    if let Some((half, tail)) = rest.split_first_chunk::<2>() {
        crc = _mm_crc32_u16(crc, u16::from_le_bytes(*half));
        rest = tail;
    }
    if let Some(&byte) = rest.first() {
        crc = _mm_crc32_u8(crc, byte);
    }

    crc
}

/// Three-lane folded update over whole blocks, serial steps for the rest
///
/// # Safety
///
/// Caller must ensure SSE4.2 and PCLMULQDQ are available.
#[target_feature(enable = "sse4.2", enable = "pclmulqdq")]
unsafe fn update_folded(crc: u32, data: &[u8]) -> u32 {
    let mut crc = !crc;

    let mut blocks = data.chunks_exact(BLOCK_LEN);
    for block in &mut blocks {
        let (words, _) = block.as_chunks::<8>();

        let mut crc0 = crc_word(crc, &words[0]);
        let mut crc1 = 0;
        let mut crc2 = 0;

        for i in 1..=LANE_WORDS {
            crc1 = crc_word(crc1, &words[i + LANE_WORDS]);
            crc2 = crc_word(crc2, &words[i + 2 * LANE_WORDS]);
            crc0 = crc_word(crc0, &words[i]);
        }

        let t1 = clmul(crc1, K2);
        let t0 = clmul(crc0, K1);

        crc = crc_word(crc2, &words[TRAILER]);
        crc ^= _mm_crc32_u64(0, t1) as u32;
        crc ^= _mm_crc32_u64(0, t0) as u32;
    }

    !update_serial_raw(crc, blocks.remainder())
}

/// Folded CRC32C update
#[inline]
pub(crate) fn update(crc: u32, data: &[u8]) -> u32 {
    debug_assert!(is_supported());
    // SAFETY: only bound by the dispatcher after `is_supported()` succeeded.
    unsafe { update_folded(crc, data) }
}

/// Serial CRC32C update without block folding
#[cfg(test)]
pub(crate) fn update_serial(crc: u32, data: &[u8]) -> u32 {
    // SAFETY: only reached after `is_supported()` succeeded.
    unsafe { !update_serial_raw(!crc, data) }
}
