//! Slice-by-8 lookup tables for the software engines
//!
//! Row 0 is the classic byte-at-a-time table for the reflected Castagnoli
//! polynomial. Row `k` advances a row-0 entry through `k` further zero
//! bytes, so one round can consume an 8-byte word with eight independent
//! lookups instead of eight dependent byte steps.
//!
//! Both tables are produced by const evaluation: they exist exactly once,
//! before the first call, and are never mutable.

use crate::POLYNOMIAL;

/// Number of rows (bytes consumed per bulk round)
pub const ROWS: usize = 8;

/// 8 rows x 256 columns of 32-bit table entries
pub type LookupTable = [[u32; 256]; ROWS];

/// Table for the little-endian word loop
pub static LITTLE: LookupTable = build_little();

/// Table for the big-endian word loop (byte-swapped entries)
pub static BIG: LookupTable = build_big();

/// Advance `crc` by one byte's worth of reflected polynomial division
const fn divide_byte(mut crc: u32) -> u32 {
    let mut bit = 0;
    while bit < 8 {
        crc = if crc & 1 != 0 {
            (crc >> 1) ^ POLYNOMIAL
        } else {
            crc >> 1
        };
        bit += 1;
    }
    crc
}

/// Build the little-endian slice-by-8 table
pub const fn build_little() -> LookupTable {
    let mut table = [[0u32; 256]; ROWS];

    let mut n = 0;
    while n < 256 {
        table[0][n] = divide_byte(n as u32);
        n += 1;
    }

    let mut n = 0;
    while n < 256 {
        let mut crc = table[0][n];
        let mut k = 1;
        while k < ROWS {
            crc = table[0][(crc & 0xFF) as usize] ^ (crc >> 8);
            table[k][n] = crc;
            k += 1;
        }
        n += 1;
    }

    table
}

/// Build the big-endian slice-by-8 table
///
/// Entries are the little-endian ones with their bytes reversed, matching
/// a working register that holds the CRC in swapped byte order.
pub const fn build_big() -> LookupTable {
    let mut table = build_little();

    let mut k = 0;
    while k < ROWS {
        let mut n = 0;
        while n < 256 {
            table[k][n] = table[k][n].swap_bytes();
            n += 1;
        }
        k += 1;
    }

    table
}
