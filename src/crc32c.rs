//! CRC32C (Castagnoli) checksums through the process-wide engine
//!
//! On aarch64 with the CRC and PMULL extensions, or x86_64 with SSE4.2 and
//! PCLMULQDQ, a three-lane folding engine is used; elsewhere a slice-by-8
//! table engine matching the host byte order.

use crate::dispatch::engine;
use crate::error::{Error, Result};

/// Continue a CRC32C over `data`
///
/// Start a stream with `crc = 0` and feed each return value back in. The
/// inversion is applied inside every call, so the value returned is always
/// a finished checksum and no finalize step exists:
///
/// ```rust
/// use crc32c_fold::{crc32c, crc32c_update};
///
/// let crc = crc32c_update(0, b"12345");
/// let crc = crc32c_update(crc, b"6789");
/// assert_eq!(crc, crc32c(b"123456789"));
/// ```
#[inline]
pub fn crc32c_update(crc: u32, data: &[u8]) -> u32 {
    engine().update(crc, data)
}

/// Compute CRC32C checksum of the given data
#[inline]
pub fn crc32c(data: &[u8]) -> u32 {
    crc32c_update(0, data)
}

/// Verify CRC32C checksum against expected value
#[inline]
pub fn verify_crc32c(data: &[u8], expected: u32) -> bool {
    crc32c(data) == expected
}

/// Verify CRC32C checksum, returning `Error::CrcMismatch` on failure
#[inline]
pub fn check_crc32c(data: &[u8], expected: u32) -> Result<()> {
    if verify_crc32c(data, expected) {
        Ok(())
    } else {
        Err(Error::CrcMismatch)
    }
}
