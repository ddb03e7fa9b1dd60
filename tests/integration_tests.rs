//! Integration tests for crc32c-fold
//!
//! These tests exercise the public API end to end across every engine the
//! running CPU supports.

use crc32c_fold::software::update_bitwise;
use crc32c_fold::*;

/// Deterministic filler so failures are reproducible
fn pattern(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed | 1;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state as u8
        })
        .collect()
}

#[test]
fn test_crc32c_known_vectors() {
    // Test known CRC32C values from RFC 3720
    assert_eq!(crc32c(&[]), 0);
    assert_eq!(crc32c(b"123456789"), CHECK_VALUE);
    assert_eq!(
        crc32c(b"The quick brown fox jumps over the lazy dog"),
        0x22620404
    );
    assert_eq!(crc32c(&[0u8; 32]), 0x8A9136AA);
    assert_eq!(crc32c(&[0xFFu8; 32]), 0x62A8AB43);

    let ascending: Vec<u8> = (0u8..32).collect();
    assert_eq!(crc32c(&ascending), 0x46DD794E);

    // Test verification
    assert!(verify_crc32c(b"123456789", CHECK_VALUE));
    assert!(!verify_crc32c(b"123456789", 0));
    assert_eq!(check_crc32c(b"123456789", 0), Err(Error::CrcMismatch));
}

#[test]
fn test_zero_length_identity() {
    assert_eq!(crc32c_update(0, b""), 0);
    for engine in available_engines() {
        for crc in [0, 7, CHECK_VALUE, u32::MAX] {
            assert_eq!(engine.update(crc, &[]), crc, "{}", engine.name());
        }
    }
}

#[test]
fn test_concatenation_at_every_split() {
    let data = pattern(3 * 1024 + 77, 0xC0FFEE);
    let whole = update_bitwise(0, &data);

    for engine in available_engines() {
        assert_eq!(engine.update(0, &data), whole, "{}", engine.name());
        for split in (0..=data.len()).step_by(13).chain([1023, 1024, 1025, 2048]) {
            let (a, b) = data.split_at(split);
            let crc = engine.update(engine.update(0, a), b);
            assert_eq!(crc, whole, "{} split at {}", engine.name(), split);
        }
    }
}

#[test]
fn test_block_boundary_lengths() {
    for len in [0, 1, 7, 8, 9, 1023, 1024, 1025, 2048, 2049] {
        let data = pattern(len, len as u32 + 1);
        let expected = update_bitwise(0, &data);
        for engine in available_engines() {
            assert_eq!(
                engine.update(0, &data),
                expected,
                "{} len {}",
                engine.name(),
                len
            );
        }
    }
}

#[test]
fn test_misaligned_starts() {
    let backing = pattern(4096 + 8, 42);
    for offset in 0..8 {
        let data = &backing[offset..offset + 4096];
        let expected = update_bitwise(0, data);
        for engine in available_engines() {
            assert_eq!(
                engine.update(0, data),
                expected,
                "{} offset {}",
                engine.name(),
                offset
            );
        }
    }
}

#[test]
fn test_cross_engine_equivalence_with_seed() {
    let data = pattern(5000, 9);
    let engines: Vec<Engine> = available_engines().collect();
    assert!(engines.len() >= 2);

    for seed in [0, 1, 0xDEADBEEF, u32::MAX] {
        let reference = engines[0].update(seed, &data);
        for engine in &engines[1..] {
            assert_eq!(engine.update(seed, &data), reference, "{}", engine.name());
        }
    }
}

#[test]
fn test_single_bit_flips_change_checksum() {
    for len in [1, 9, 64, 1024, 1500] {
        let mut data = pattern(len, 0xA11CE + len as u32);
        for engine in available_engines() {
            let original = engine.update(0, &data);
            for byte in (0..len).step_by(len.div_ceil(16)) {
                for bit in 0..8 {
                    data[byte] ^= 1 << bit;
                    let flipped = engine.update(0, &data);
                    data[byte] ^= 1 << bit;
                    assert_ne!(
                        flipped,
                        original,
                        "{} len {} byte {} bit {}",
                        engine.name(),
                        len,
                        byte,
                        bit
                    );
                }
            }
        }
    }
}

#[test]
fn test_leading_zero_bytes_matter() {
    let data = b"payload";
    let mut padded = vec![0u8; 4];
    padded.extend_from_slice(data);
    assert_ne!(crc32c(data), crc32c(&padded));
}

#[test]
fn test_bound_engine_is_stable() {
    let bound = engine();
    assert_eq!(engine(), bound);
    assert!(bound.kind().is_supported());
    assert_eq!(crc32c(b"123456789"), bound.update(0, b"123456789"));
}

#[test]
fn test_engine_kind_names_are_unique() {
    let names: Vec<&str> = EngineKind::ALL.iter().map(|k| k.name()).collect();
    for (i, a) in names.iter().enumerate() {
        for b in &names[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[cfg(feature = "std")]
#[test]
fn test_reader_matches_update() {
    use crc32c_fold::reader::{checksum_reader, DEFAULT_CHUNK_SIZE};

    let data = pattern(3 * DEFAULT_CHUNK_SIZE + 5, 3);
    let mut buf = vec![0u8; DEFAULT_CHUNK_SIZE];
    for engine in available_engines() {
        let crc = checksum_reader(&engine, &data[..], &mut buf).unwrap();
        assert_eq!(crc, crc32c(&data), "{}", engine.name());
    }
}
