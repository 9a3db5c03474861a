//! Configuration and report types.

use crate::error::{Error, Result};
use std::path::PathBuf;

pub const KB: usize = 1024;
pub const MB: usize = 1024 * KB;
pub const GB: usize = 1024 * MB;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Bytes read from the source per block. Must be non-zero.
    pub block_size: usize,
    /// Compression level handed to the codec unchanged.
    pub level: i32,
    /// Write every compressed block to its own artifact file.
    pub persist_chunks: bool,
    /// Request sub-block compression at `inner_block_size` granularity.
    /// Not implemented: blocks are still compressed whole, with a warning.
    pub partial_read: bool,
    pub inner_block_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            block_size: 1 * MB,
            level: zstd::DEFAULT_COMPRESSION_LEVEL,
            persist_chunks: true,
            partial_read: false,
            inner_block_size: 64 * KB,
        }
    }
}

impl Config {
    pub fn with_block_size(mut self, size: usize) -> Self {
        self.block_size = size;
        self
    }

    pub fn with_level(mut self, level: i32) -> Self {
        self.level = level;
        self
    }

    pub fn with_persist_chunks(mut self, persist: bool) -> Self {
        self.persist_chunks = persist;
        self
    }

    /// Enables partial reads with the given inner block size.
    pub fn with_partial_read(mut self, inner_block_size: usize) -> Self {
        self.partial_read = true;
        self.inner_block_size = inner_block_size;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.block_size == 0 {
            return Err(Error::InvalidConfig("block_size must be non-zero"));
        }
        if !zstd::compression_level_range().contains(&self.level) {
            return Err(Error::InvalidConfig("compression level out of range"));
        }
        if self.partial_read {
            if self.inner_block_size == 0 {
                return Err(Error::InvalidConfig("inner_block_size must be non-zero"));
            }
            if self.inner_block_size > self.block_size {
                return Err(Error::InvalidConfig(
                    "inner_block_size cannot exceed block_size",
                ));
            }
        }
        Ok(())
    }

    pub fn strategy(&self) -> BlockStrategy {
        if self.partial_read {
            BlockStrategy::PartialBlock(self.inner_block_size)
        } else {
            BlockStrategy::FullBlock
        }
    }
}

/// How a single block is handed to the codec.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockStrategy {
    /// The whole block in one call.
    FullBlock,
    /// Sub-blocks of the given size. Currently compressed as `FullBlock`.
    PartialBlock(usize),
}

/// Outcome of one compressed block.
#[derive(Clone, Debug, PartialEq)]
pub struct ChunkStats {
    /// 0-based, contiguous within a file.
    pub index: usize,
    pub bytes_in: usize,
    pub bytes_out: usize,
    /// `bytes_out / bytes_in`, 0.0 for empty input.
    pub ratio: f64,
    /// Set when the block was persisted.
    pub artifact: Option<PathBuf>,
}

impl ChunkStats {
    pub fn new(index: usize, bytes_in: usize, bytes_out: usize) -> Self {
        Self {
            index,
            bytes_in,
            bytes_out,
            ratio: ratio(bytes_in, bytes_out),
            artifact: None,
        }
    }
}

/// Per-file result of chunked compression.
#[derive(Clone, Debug, PartialEq)]
pub struct FileReport {
    pub input: PathBuf,
    /// Directory holding the artifacts, when persisting.
    pub output_dir: Option<PathBuf>,
    pub chunks: Vec<ChunkStats>,
}

impl FileReport {
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// An empty source yields zero chunks, which is still a success.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn bytes_in(&self) -> usize {
        self.chunks.iter().map(|c| c.bytes_in).sum()
    }

    pub fn bytes_out(&self) -> usize {
        self.chunks.iter().map(|c| c.bytes_out).sum()
    }

    pub fn ratio(&self) -> f64 {
        ratio(self.bytes_in(), self.bytes_out())
    }
}

/// Result of a directory run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub processed: Vec<FileReport>,
    pub failed: Vec<(PathBuf, Error)>,
}

impl BatchReport {
    pub fn processed_count(&self) -> usize {
        self.processed.len()
    }
}

pub(crate) fn ratio(bytes_in: usize, bytes_out: usize) -> f64 {
    if bytes_in == 0 {
        0.0
    } else {
        bytes_out as f64 / bytes_in as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_harness() {
        let cfg = Config::default();
        assert_eq!(cfg.block_size, MB);
        assert_eq!(cfg.level, 3);
        assert!(cfg.persist_chunks);
        assert!(!cfg.partial_read);
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.strategy(), BlockStrategy::FullBlock);
    }

    #[test]
    fn rejects_zero_block_size() {
        let cfg = Config::default().with_block_size(0);
        assert!(matches!(cfg.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn rejects_level_out_of_range() {
        let cfg = Config::default().with_level(10_000);
        assert!(matches!(cfg.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn partial_read_selects_strategy() {
        let cfg = Config::default().with_block_size(1024).with_partial_read(256);
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.strategy(), BlockStrategy::PartialBlock(256));

        let too_big = Config::default().with_block_size(128).with_partial_read(256);
        assert!(too_big.validate().is_err());

        // ignored while partial reads are off
        let off = Config {
            inner_block_size: 0,
            ..Config::default()
        };
        assert!(off.validate().is_ok());
    }

    #[test]
    fn ratio_of_empty_input_is_zero() {
        assert_eq!(ChunkStats::new(0, 0, 9).ratio, 0.0);
        assert_eq!(ChunkStats::new(0, 100, 25).ratio, 0.25);
    }

    #[test]
    fn file_report_totals() {
        let report = FileReport {
            input: PathBuf::from("a.bin"),
            output_dir: None,
            chunks: vec![ChunkStats::new(0, 100, 40), ChunkStats::new(1, 50, 10)],
        };
        assert_eq!(report.chunk_count(), 2);
        assert_eq!(report.bytes_in(), 150);
        assert_eq!(report.bytes_out(), 50);
        assert!((report.ratio() - 1.0 / 3.0).abs() < 1e-9);
    }
}
