//! Crate error taxonomy.
//!
//! Every variant is fatal to the single file being processed; the directory
//! driver decides whether to move on to the next one.

use crate::encoding;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

/// Crate error
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed to open {}: {source}", path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A read failed part way through the file. Never folded into end of file.
    #[error("failed reading {} at offset {offset}: {source}", path.display())]
    SourceReadFailed {
        path: PathBuf,
        offset: u64,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to create output directory {}: {source}", path.display())]
    OutputDirUncreatable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("compression failed for {file} chunk {chunk:04}: {source}")]
    CompressionFailed {
        file: String,
        chunk: usize,
        #[source]
        source: encoding::Error,
    },
    #[error("failed to write compressed data to {}: {source}", path.display())]
    ArtifactWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("destination capacity {capacity} too small, need >= {required} for {}", path.display())]
    DestinationTooSmall {
        path: PathBuf,
        capacity: usize,
        required: usize,
    },
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
