//! Error types for engine selection and checksum verification

/// Errors surfaced outside the (total) checksum engines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Requested engine is not compiled in for this target
    UnsupportedEngine,
    /// Engine is compiled in but the running CPU lacks its instructions
    MissingCpuFeature,
    /// CRC32C checksum mismatch
    CrcMismatch,
}

impl Error {
    /// Returns a human-readable description of the error
    pub const fn description(&self) -> &'static str {
        match self {
            Error::UnsupportedEngine => "engine is not available for this target",
            Error::MissingCpuFeature => "CPU lacks the instructions required by the engine",
            Error::CrcMismatch => "CRC32C checksum verification failed",
        }
    }
}

#[cfg(feature = "std")]
impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type alias for engine selection and verification
pub type Result<T> = core::result::Result<T, Error>;
