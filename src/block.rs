//! Single-block compression into reusable scratch space.

use crate::{
    encoding::{self, BlockCodec},
    types::{BlockStrategy, Config},
};
use tracing::warn;

/// Source and destination buffers, reused across blocks and files.
///
/// The destination only ever grows: it is resized to the codec bound of the
/// current block when that bound exceeds its length.
#[derive(Debug, Default)]
pub struct ScratchBuffers {
    pub(crate) src: Vec<u8>,
    pub(crate) dst: Vec<u8>,
}

impl ScratchBuffers {
    /// Buffers presized for `cfg.block_size` blocks.
    pub fn for_config<C: BlockCodec>(codec: &C, cfg: &Config) -> Self {
        Self {
            src: Vec::with_capacity(cfg.block_size),
            dst: vec![0; codec.compress_bound(cfg.block_size)],
        }
    }

    /// Usable destination size in bytes.
    pub fn dst_capacity(&self) -> usize {
        self.dst.len()
    }

    pub fn dst(&self) -> &[u8] {
        &self.dst
    }

    pub fn dst_mut(&mut self) -> &mut Vec<u8> {
        &mut self.dst
    }
}

/// Compress `src` into `dst`, growing `dst` to the codec bound when needed.
///
/// Returns the compressed size; the bytes are `dst[..size]`.
///
/// A codec failure comes back as the codec's own [`encoding::Error`], not
/// retried. [`compress_file_in_chunks`](crate::compress_file_in_chunks) wraps
/// it as `Error::CompressionFailed` with the file name and chunk index.
pub fn compress_block<C: BlockCodec>(
    codec: &C,
    src: &[u8],
    cfg: &Config,
    dst: &mut Vec<u8>,
) -> encoding::Result<usize> {
    if let BlockStrategy::PartialBlock(inner) = cfg.strategy() {
        warn!(
            "partial_read (inner block {} bytes) is not implemented; compressing full block",
            inner
        );
    }

    let required = codec.compress_bound(src.len());
    if dst.len() < required {
        dst.resize(required, 0);
    }

    codec.compress(src, dst, cfg.level)
}
