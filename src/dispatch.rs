//! Engine selection
//!
//! Exactly one engine is bound per process. With `std` the choice is made
//! on first use from runtime CPU detection and cached in a `OnceLock`;
//! without it the choice follows the compile-time target features. Every
//! engine computes the same function, so any of them may be constructed
//! explicitly for testing or benchmarking.

use crate::error::{Error, Result};
use crate::software;

#[cfg(not(any(target_endian = "little", target_endian = "big")))]
compile_error!("no software CRC32C engine matches this target's byte order");

/// The engines this crate can provide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineKind {
    /// Slice-by-8 tables, little-endian word loads
    SoftwareLittle,
    /// Slice-by-8 tables, big-endian word loads
    SoftwareBig,
    /// AArch64 CRC extension with PMULL lane folding
    Aarch64Fold,
    /// x86_64 SSE4.2 with PCLMULQDQ lane folding
    X86_64Fold,
}

impl EngineKind {
    /// Every engine kind, fastest first
    pub const ALL: [EngineKind; 4] = [
        EngineKind::Aarch64Fold,
        EngineKind::X86_64Fold,
        EngineKind::SoftwareLittle,
        EngineKind::SoftwareBig,
    ];

    /// Software engine matching the target's native byte order
    pub const NATIVE_SOFTWARE: EngineKind = if cfg!(target_endian = "big") {
        EngineKind::SoftwareBig
    } else {
        EngineKind::SoftwareLittle
    };

    /// Short stable name of the engine
    pub const fn name(self) -> &'static str {
        match self {
            EngineKind::SoftwareLittle => "software-little",
            EngineKind::SoftwareBig => "software-big",
            EngineKind::Aarch64Fold => "aarch64-crc-pmull",
            EngineKind::X86_64Fold => "x86_64-sse42-pclmul",
        }
    }

    /// Returns `true` for the hardware engines
    pub const fn is_hardware(self) -> bool {
        matches!(self, EngineKind::Aarch64Fold | EngineKind::X86_64Fold)
    }

    /// Check whether this engine can run here
    pub fn check_supported(self) -> Result<()> {
        match self {
            EngineKind::SoftwareLittle | EngineKind::SoftwareBig => Ok(()),

            #[cfg(target_arch = "aarch64")]
            EngineKind::Aarch64Fold if crate::hardware::aarch64::is_supported() => Ok(()),
            #[cfg(target_arch = "aarch64")]
            EngineKind::Aarch64Fold => Err(Error::MissingCpuFeature),

            #[cfg(target_arch = "x86_64")]
            EngineKind::X86_64Fold if crate::hardware::x86_64::is_supported() => Ok(()),
            #[cfg(target_arch = "x86_64")]
            EngineKind::X86_64Fold => Err(Error::MissingCpuFeature),

            #[allow(unreachable_patterns)]
            _ => Err(Error::UnsupportedEngine),
        }
    }

    /// Returns `true` if this engine can run here
    pub fn is_supported(self) -> bool {
        self.check_supported().is_ok()
    }
}

/// A bound CRC32C engine
///
/// Construction proves the engine can run on this CPU, so `update` is
/// always safe to call.
#[derive(Clone, Copy)]
pub struct Engine {
    kind: EngineKind,
    update: fn(u32, &[u8]) -> u32,
}

impl Engine {
    /// Bind a specific engine
    ///
    /// Fails if the engine is not compiled for this target or the CPU
    /// lacks the instructions it needs.
    pub fn new(kind: EngineKind) -> Result<Self> {
        kind.check_supported()?;

        let update: fn(u32, &[u8]) -> u32 = match kind {
            EngineKind::SoftwareLittle => software::update_little,
            EngineKind::SoftwareBig => software::update_big,
            #[cfg(target_arch = "aarch64")]
            EngineKind::Aarch64Fold => crate::hardware::aarch64::update,
            #[cfg(target_arch = "x86_64")]
            EngineKind::X86_64Fold => crate::hardware::x86_64::update,
            #[allow(unreachable_patterns)]
            _ => return Err(Error::UnsupportedEngine),
        };

        Ok(Self { kind, update })
    }

    /// Pick the best engine for this CPU without caching
    ///
    /// The hardware engine for the running architecture if it is usable,
    /// otherwise the software engine matching the native byte order.
    pub fn detect() -> Self {
        let kind = EngineKind::ALL
            .into_iter()
            .filter(|kind| kind.is_hardware())
            .find(|kind| kind.is_supported())
            .unwrap_or(EngineKind::NATIVE_SOFTWARE);

        match Self::new(kind) {
            Ok(engine) => engine,
            Err(_) => Self::native_software(),
        }
    }

    /// The software engine for the native byte order
    pub const fn native_software() -> Self {
        let update: fn(u32, &[u8]) -> u32 = if cfg!(target_endian = "big") {
            software::update_big
        } else {
            software::update_little
        };
        Self {
            kind: EngineKind::NATIVE_SOFTWARE,
            update,
        }
    }

    /// Which engine this is
    #[inline]
    pub const fn kind(&self) -> EngineKind {
        self.kind
    }

    /// Short stable name of the engine
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Advance `crc` over `data`
    ///
    /// Pass 0 to start a stream and the previous return value to continue
    /// it; the return value is always the finished checksum of everything
    /// seen so far.
    #[inline]
    pub fn update(&self, crc: u32, data: &[u8]) -> u32 {
        (self.update)(crc, data)
    }
}

impl core::fmt::Debug for Engine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Engine").field("kind", &self.kind).finish()
    }
}

impl PartialEq for Engine {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl Eq for Engine {}

/// The engine bound for this process
///
/// Detected once on first call; every later call returns the same engine.
#[cfg(feature = "std")]
pub fn engine() -> Engine {
    use std::sync::OnceLock;
    static BOUND: OnceLock<Engine> = OnceLock::new();
    *BOUND.get_or_init(Engine::detect)
}

/// The engine bound for this build
///
/// Without runtime detection the choice depends only on compile-time
/// target features, so it is fixed for the life of the binary.
#[cfg(not(feature = "std"))]
pub fn engine() -> Engine {
    Engine::detect()
}

/// Every engine that can run on this CPU, fastest first
pub fn available_engines() -> impl Iterator<Item = Engine> {
    EngineKind::ALL
        .into_iter()
        .filter_map(|kind| Engine::new(kind).ok())
}
