//! Errors surfaced by the command line tool.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Compression or decompression failed
    #[error(transparent)]
    Codec(#[from] huffpack_core::Error),

    /// Reading the input failed
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing or renaming the output failed
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Verify mode restored different bytes
    #[error("round trip mismatch: crc32 {expected:#010x} before, {actual:#010x} after")]
    RoundTripMismatch { expected: u32, actual: u32 },
}

pub type Result<T> = std::result::Result<T, AppError>;
