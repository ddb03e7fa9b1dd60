//! Basic usage example for crc32c-fold
//!
//! Run with: cargo run --example basic_usage

use crc32c_fold::*;

fn main() -> Result<(), Error> {
    println!("crc32c-fold Basic Usage Example");
    println!("===============================");

    // Example 1: One-shot checksum through the bound engine
    println!("\n1. One-shot checksum:");
    {
        let crc = crc32c(b"123456789");
        println!("  engine = {}", engine().name());
        println!("  crc32c(\"123456789\") = {:08x}", crc);
        check_crc32c(b"123456789", CHECK_VALUE)?;
    }

    // Example 2: Streaming by threading the accumulator through each call
    println!("\n2. Streaming in chunks:");
    {
        let message = b"The quick brown fox jumps over the lazy dog";
        let mut crc = 0;
        for chunk in message.chunks(10) {
            crc = crc32c_update(crc, chunk);
            println!("  after {:2} bytes: {:08x}", chunk.len(), crc);
        }
        assert_eq!(crc, crc32c(message));
        println!("  final = {:08x}", crc);
    }

    // Example 3: Forcing a specific engine
    println!("\n3. Forcing engines:");
    {
        let data = vec![0xA5u8; 4096];
        for kind in EngineKind::ALL {
            match Engine::new(kind) {
                Ok(forced) => println!("  {:<20} {:08x}", kind.name(), forced.update(0, &data)),
                Err(err) => println!("  {:<20} unavailable: {}", kind.name(), err),
            }
        }
    }

    Ok(())
}
