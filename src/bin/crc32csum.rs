//! crc32csum CLI - print CRC32C checksums of files
//!
//! Prints one `<crc>\t<name>` line per input, in lowercase hex. Inputs
//! that cannot be read are reported on stderr and skipped; the exit status
//! is non-zero if any input failed.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{debug, error, trace, warn, Level};

use crc32c_fold::reader::{checksum_reader, DEFAULT_CHUNK_SIZE};
use crc32c_fold::{engine, Engine, EngineKind};

/// Compute CRC32C (Castagnoli) checksums.
#[derive(Parser, Debug)]
#[command(name = "crc32csum")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
EXAMPLES:
    crc32csum file.bin                  Checksum one file
    crc32csum a.bin b.bin               Checksum several files
    cat file.bin | crc32csum            Checksum standard input
    crc32csum -e software-little f.bin  Force the table-driven engine")]
struct Args {
    /// Files to checksum ("-" reads standard input)
    #[arg(value_name = "FILE", default_value = "-")]
    files: Vec<PathBuf>,

    /// Use this engine instead of the detected one
    #[arg(short, long, value_enum)]
    engine: Option<EngineArg>,

    /// Bytes per read
    #[arg(
        long,
        default_value_t = DEFAULT_CHUNK_SIZE,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    chunk_size: usize,

    /// Log more (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum EngineArg {
    /// Slice-by-8, little-endian word loads
    SoftwareLittle,
    /// Slice-by-8, big-endian word loads
    SoftwareBig,
    /// AArch64 CRC + PMULL folding
    Aarch64,
    /// x86_64 SSE4.2 + PCLMULQDQ folding
    X86_64,
}

impl From<EngineArg> for EngineKind {
    fn from(arg: EngineArg) -> Self {
        match arg {
            EngineArg::SoftwareLittle => EngineKind::SoftwareLittle,
            EngineArg::SoftwareBig => EngineKind::SoftwareBig,
            EngineArg::Aarch64 => EngineKind::Aarch64Fold,
            EngineArg::X86_64 => EngineKind::X86_64Fold,
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .init();
}

fn select_engine(forced: Option<EngineArg>) -> Result<Engine> {
    match forced {
        Some(arg) => {
            let kind = EngineKind::from(arg);
            Engine::new(kind).with_context(|| format!("engine {} cannot run here", kind.name()))
        }
        None => Ok(engine()),
    }
}

fn checksum_path(engine: &Engine, path: &Path, buf: &mut [u8]) -> Result<u32> {
    if path == Path::new("-") {
        let stdin = io::stdin();
        return checksum_reader(engine, stdin.lock(), buf).context("failed to read standard input");
    }

    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    checksum_reader(engine, file, buf).with_context(|| format!("failed to read {}", path.display()))
}

/// Checksum every input into `out`; `Ok(false)` if any input failed
fn run<W: Write>(args: &Args, out: &mut W) -> Result<bool> {
    let engine = select_engine(args.engine)?;
    debug!(engine = engine.name(), "bound CRC32C engine");

    let mut buf = vec![0u8; args.chunk_size];
    let mut all_ok = true;

    for path in &args.files {
        match checksum_path(&engine, path, &mut buf) {
            Ok(crc) => {
                trace!(path = %path.display(), crc, "checksummed");
                writeln!(out, "{:x}\t{}", crc, path.display()).context("failed to write output")?;
            }
            Err(err) => {
                error!("{err:#}");
                all_ok = false;
            }
        }
    }

    out.flush().context("failed to write output")?;
    Ok(all_ok)
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let stdout = io::stdout();
    match run(&args, &mut stdout.lock()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            warn!("failed to process some files");
            ExitCode::FAILURE
        }
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
