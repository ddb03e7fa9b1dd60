//! AArch64 CRC32C engine: CRC extension + PMULL lane merge
//!
//! Uses `crc32c{b,h,w,x}` for the per-word steps and `pmull` (part of the
//! crypto/AES extension) for the carry-less multiply that merges lanes.

// Intrinsics require unsafe; callers are gated on runtime detection.
#![allow(unsafe_code)]

use core::arch::aarch64::{__crc32cb, __crc32cd, __crc32ch, __crc32cw, vmull_p64};

use super::FoldGeometry;

/// 42-word lanes: 1 KiB blocks, three chains hide the 3-cycle step latency
pub(crate) const GEOMETRY: FoldGeometry = FoldGeometry { lane_words: 42 };

const BLOCK_LEN: usize = GEOMETRY.block_len();
const LANE_WORDS: usize = GEOMETRY.lane_words;
const TRAILER: usize = GEOMETRY.trailer_word();
const K1: u64 = GEOMETRY.k1();
const K2: u64 = GEOMETRY.k2();

/// Returns `true` if the running CPU has the CRC and PMULL extensions
#[cfg(feature = "std")]
#[inline]
pub(crate) fn is_supported() -> bool {
    std::arch::is_aarch64_feature_detected!("crc") && std::arch::is_aarch64_feature_detected!("aes")
}

/// Returns `true` if the build targets the CRC and PMULL extensions
#[cfg(not(feature = "std"))]
#[inline]
pub(crate) fn is_supported() -> bool {
    cfg!(all(target_feature = "crc", target_feature = "aes"))
}

/// Word steps, then at most one 4-, 2- and 1-byte step
///
/// # Safety
///
/// Caller must ensure the CRC extension is available.
#[target_feature(enable = "crc")]
unsafe fn update_serial_raw(mut crc: u32, data: &[u8]) -> u32 {
    let (words, mut rest) = data.as_chunks::<8>();
    for word in words {
        crc = __crc32cd(crc, u64::from_le_bytes(*word));
    }

    if let Some((word, tail)) = rest.split_first_chunk::<4>() {
        crc = __crc32cw(crc, u32::from_le_bytes(*word));
        rest = tail;
    }
    if let Some((half, tail)) = rest.split_first_chunk::<2>() {
        crc = __crc32ch(crc, u16::from_le_bytes(*half));
        rest = tail;
    }
    if let Some(&byte) = rest.first() {
        crc = __crc32cb(crc, byte);
    }

    crc
}

/// Three-lane folded update over whole blocks, serial steps for the rest
///
/// # Safety
///
/// Caller must ensure the CRC and AES (PMULL) extensions are available.
#[target_feature(enable = "crc", enable = "aes")]
unsafe fn update_folded(crc: u32, data: &[u8]) -> u32 {
    let mut crc = !crc;

    let mut blocks = data.chunks_exact(BLOCK_LEN);
    for block in &mut blocks {
        let (words, _) = block.as_chunks::<8>();

        // Seed lane 0 first so the merge has the longest lead time
        let mut crc0 = __crc32cd(crc, u64::from_le_bytes(words[0]));
        let mut crc1 = 0;
        let mut crc2 = 0;

        for i in 1..=LANE_WORDS {
            crc1 = __crc32cd(crc1, u64::from_le_bytes(words[i + LANE_WORDS]));
            crc2 = __crc32cd(crc2, u64::from_le_bytes(words[i + 2 * LANE_WORDS]));
            crc0 = __crc32cd(crc0, u64::from_le_bytes(words[i]));
        }

        let t1 = vmull_p64(crc1 as u64, K2) as u64;
        let t0 = vmull_p64(crc0 as u64, K1) as u64;

        crc = __crc32cd(crc2, u64::from_le_bytes(words[TRAILER]));
        crc ^= __crc32cd(0, t1);
        crc ^= __crc32cd(0, t0);
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
