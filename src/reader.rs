//! Streaming a `Read` source through an engine

use std::io::{self, Read};

use crate::dispatch::Engine;

/// Read size used by the command-line driver
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Checksum everything `reader` yields, `buf.len()` bytes at a time
///
/// Starts from accumulator 0. Interrupted reads are retried; any other
/// error aborts the stream. An empty `buf` is rejected with
/// `InvalidInput`, since a zero-length read cannot be told apart from EOF.
pub fn checksum_reader<R: Read>(engine: &Engine, mut reader: R, buf: &mut [u8]) -> io::Result<u32> {
    if buf.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "checksum buffer must not be empty",
        ));
    }

    let mut crc = 0;
    loop {
        match reader.read(buf) {
            Ok(0) => return Ok(crc),
            Ok(n) => crc = engine.update(crc, &buf[..n]),
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
}
