//! crc32c-fold: CRC32C (Castagnoli) checksums tuned to the host CPU
//!
//! This crate computes CRC32C with one of several interchangeable engines,
//! all of which return identical results:
//!
//! - **aarch64**: CRC extension instructions over three interleaved lanes,
//!   merged with a PMULL carry-less multiply
//! - **x86_64**: SSE4.2 `crc32` over three interleaved lanes, merged with
//!   PCLMULQDQ
//! - **software**: slice-by-8 lookup tables, in little- and big-endian
//!   word-load variants
//!
//! One engine is bound per process, on first use with `std` or from the
//! target configuration without it.
//!
//! # Accumulator
//!
//! Every call takes the previous result (0 for a fresh stream) and returns
//! the checksum of everything seen so far. Splitting a stream anywhere
//! gives the same answer as checksumming it in one go.
//!
//! # Example
//!
//! ```rust
//! use crc32c_fold::*;
//!
//! assert_eq!(crc32c(b"123456789"), 0xE306_9283);
//!
//! let crc = crc32c_update(0, b"1234");
//! let crc = crc32c_update(crc, b"56789");
//! assert_eq!(crc, 0xE306_9283);
//!
//! // Any engine usable here produces the same value
//! for engine in available_engines() {
//!     assert_eq!(engine.update(0, b"123456789"), 0xE306_9283);
//! }
//! ```

#![no_std]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[cfg(any(feature = "std", test))]
extern crate std;

pub mod crc32c;
pub mod dispatch;
pub mod error;
pub mod hardware;
pub mod software;
pub mod table;

#[cfg(feature = "std")]
pub mod reader;

// Re-export main types
pub use crc32c::{check_crc32c, crc32c, crc32c_update, verify_crc32c};
pub use dispatch::{available_engines, engine, Engine, EngineKind};
pub use error::Error;

/// CRC32C polynomial (Castagnoli), reversed bit order
pub const POLYNOMIAL: u32 = 0x82F6_3B78;

/// CRC32C of `"123456789"`, the standard check value
pub const CHECK_VALUE: u32 = 0xE306_9283;
