//! Error types for wordlist generation
//!
//! Every failure is local to a single `generate` call and leaves the
//! on-disk state well defined (a partial wordlist is never rolled back).

use std::io;
use std::path::PathBuf;

/// Errors produced by the generation engine
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// Length bounds are not positive or `min > max`
    #[error("invalid length range: min ({min}) must be >= 1 and <= max ({max})")]
    InvalidRange { min: u32, max: u32 },

    /// Every symbol was removed by the exclusion set
    #[error("alphabet is empty after applying exclusions")]
    EmptyAlphabet,

    /// The output sink could not be opened or a write failed partway
    #[error("failed to write wordlist {path:?} after {written} words")]
    IoWrite {
        path: PathBuf,
        written: u64,
        #[source]
        source: io::Error,
    },

    /// The archive could not be created; the plain artifact is still valid
    #[error("failed to compress {path:?}")]
    Compression {
        path: PathBuf,
        #[source]
        source: CompressionError,
    },
}

/// Failures while building a ZIP archive
#[derive(Debug, thiserror::Error)]
pub enum CompressionError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Entry names are stored as UTF-8 and must match the artifact's base name
    #[error("file name of {0:?} is missing or not valid UTF-8")]
    InvalidEntryName(PathBuf),

    /// ZIP64 is not produced, so entries are capped at 4 GiB
    #[error("{0} bytes exceeds the 4 GiB limit of a ZIP entry")]
    TooLarge(u64),
}

pub type Result<T> = std::result::Result<T, GenerationError>;
