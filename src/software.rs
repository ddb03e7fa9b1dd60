//! Table-driven CRC32C engines usable on any CPU
//!
//! Both variants follow the same shape: byte steps until the input pointer
//! is 8-byte aligned, slice-by-8 rounds over whole words, then byte steps
//! over the tail. They differ only in how a word is loaded and which end
//! of it feeds which table row. Word loads are explicit about byte order,
//! so each variant is correct on any host; the dispatcher binds the one
//! that matches the native order.

use crate::table::{BIG, LITTLE};
use crate::POLYNOMIAL;

/// Split `data` into an unaligned head, whole 8-byte words and a tail
#[inline]
fn split_aligned(data: &[u8]) -> (&[u8], &[[u8; 8]], &[u8]) {
    let head = data.as_ptr().align_offset(8).min(data.len());
    let (head, rest) = data.split_at(head);
    let (words, tail) = rest.as_chunks::<8>();
    (head, words, tail)
}

/// Byte-at-a-time update on the un-inverted register
#[inline]
fn update_bytes(mut crc: u32, data: &[u8]) -> u32 {
    for &byte in data {
        crc = LITTLE[0][((crc ^ byte as u32) & 0xFF) as usize] ^ (crc >> 8);
    }
    crc
}

/// Software CRC32C, little-endian word loads
///
/// `crc` is the value returned by the previous call, or 0 for a fresh stream.
pub fn update_little(crc: u32, data: &[u8]) -> u32 {
    let (head, words, tail) = split_aligned(data);

    let mut crc = update_bytes(!crc, head);

    if !words.is_empty() {
        let mut crcw = crc as u64;
        for word in words {
            crcw ^= u64::from_le_bytes(*word);
            crcw = (LITTLE[7][(crcw & 0xFF) as usize]
                ^ LITTLE[6][((crcw >> 8) & 0xFF) as usize]
                ^ LITTLE[5][((crcw >> 16) & 0xFF) as usize]
                ^ LITTLE[4][((crcw >> 24) & 0xFF) as usize]
                ^ LITTLE[3][((crcw >> 32) & 0xFF) as usize]
                ^ LITTLE[2][((crcw >> 40) & 0xFF) as usize]
                ^ LITTLE[1][((crcw >> 48) & 0xFF) as usize]
                ^ LITTLE[0][(crcw >> 56) as usize]) as u64;
        }
        crc = crcw as u32;
    }

    !update_bytes(crc, tail)
}

/// Software CRC32C, big-endian word loads
///
/// Inside the word loop the register lives in the top half of a 64-bit
/// value with its bytes swapped, so the first input byte lines up with the
/// most significant lane.
pub fn update_big(crc: u32, data: &[u8]) -> u32 {
    let (head, words, tail) = split_aligned(data);

    let mut crc = update_bytes(!crc, head);

    if !words.is_empty() {
        let mut crcw = (crc.swap_bytes() as u64) << 32;
        for word in words {
            crcw ^= u64::from_be_bytes(*word);
            crcw = ((BIG[0][(crcw & 0xFF) as usize]
                ^ BIG[1][((crcw >> 8) & 0xFF) as usize]
                ^ BIG[2][((crcw >> 16) & 0xFF) as usize]
                ^ BIG[3][((crcw >> 24) & 0xFF) as usize]
                ^ BIG[4][((crcw >> 32) & 0xFF) as usize]
                ^ BIG[5][((crcw >> 40) & 0xFF) as usize]
                ^ BIG[6][((crcw >> 48) & 0xFF) as usize]
                ^ BIG[7][(crcw >> 56) as usize]) as u64)
                << 32;
        }
        crc = ((crcw >> 32) as u32).swap_bytes();
    }

    !update_bytes(crc, tail)
}

/// Bit-at-a-time reflected division, no tables
///
/// Far too slow for real use; it is the oracle the table-driven and
/// hardware engines are checked against.
pub fn update_bitwise(crc: u32, data: &[u8]) -> u32 {
    let mut crc = !crc;
    for &byte in data {
        crc ^= byte as u32;
        for _ in 0..8 {
            crc = if crc & 1 != 0 {
                (crc >> 1) ^ POLYNOMIAL
            } else {
                crc >> 1
            };
        }
    }
    !crc
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHECK: &[u8] = b"123456789";

    #[test]
    fn test_known_vectors() {
        for update in [update_little, update_big, update_bitwise] {
            assert_eq!(update(0, &[]), 0);
            assert_eq!(update(0, CHECK), 0xE306_9283);
            assert_eq!(update(0, b"1234"), 0xF63A_F4EE);
            assert_eq!(update(0, b"12345678"), 0x6087_809A);
            assert_eq!(
                update(0, b"The quick brown fox jumps over the lazy dog"),
                0x2262_0404
            );
        }
    }

    #[test]
    fn test_zero_length_keeps_accumulator() {
        for crc in [0, 1, 0xE306_9283, u32::MAX] {
            assert_eq!(update_little(crc, &[]), crc);
            assert_eq!(update_big(crc, &[]), crc);
        }
    }

    #[test]
    fn test_every_alignment_and_length() {
        let mut backing = [0u8; 128];
        for (i, byte) in backing.iter_mut().enumerate() {
            *byte = (i as u8).wrapping_mul(37).wrapping_add(11);
        }

        for offset in 0..8 {
            for len in 0..(backing.len() - offset) {
                let data = &backing[offset..offset + len];
                let expected = update_bitwise(0x1234_5678, data);
                assert_eq!(update_little(0x1234_5678, data), expected);
                assert_eq!(update_big(0x1234_5678, data), expected);
            }
        }
    }

    #[test]
    fn test_split_aligned_covers_input() {
        let backing = [0xA5u8; 40];
        for offset in 0..8 {
            let data = &backing[offset..];
            let (head, words, tail) = split_aligned(data);
            assert!(head.len() < 8);
            assert!(tail.len() < 8);
            assert_eq!(head.len() + words.len() * 8 + tail.len(), data.len());
            if !words.is_empty() {
                assert_eq!(words.as_ptr() as usize % 8, 0);
            }
        }
    }
}
