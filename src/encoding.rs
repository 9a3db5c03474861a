//! Block-compression primitive boundary.
//!
//! A codec needs three things: a worst-case output bound for a given input
//! size, a one-shot compress into a caller-supplied buffer, and readable error
//! text. [`ZstdCodec`] is the only implementation shipped.

use zstd::zstd_safe;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The primitive rejected the input; `message` is its own error name.
    #[error("{codec} compress failed: {message}")]
    Compress {
        codec: &'static str,
        code: usize,
        message: String,
    },
}

/// One-shot block compressor.
pub trait BlockCodec {
    /// Short codec name used in errors and logs.
    const NAME: &'static str;
    /// File extension (without the dot) given to persisted blocks.
    const EXTENSION: &'static str;

    /// Worst-case compressed size for `src_len` input bytes.
    fn compress_bound(&self, src_len: usize) -> usize;

    /// Compress `src` into `dst`, returning the number of bytes written.
    ///
    /// `dst` must be at least `compress_bound(src.len())` bytes long.
    fn compress(&self, src: &[u8], dst: &mut [u8], level: i32) -> Result<usize>;
}

/// Zstandard, one independent frame per call.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZstdCodec;

impl BlockCodec for ZstdCodec {
    const NAME: &'static str = "zstd";
    const EXTENSION: &'static str = "zst";

    fn compress_bound(&self, src_len: usize) -> usize {
        zstd_safe::compress_bound(src_len)
    }

    fn compress(&self, src: &[u8], dst: &mut [u8], level: i32) -> Result<usize> {
        zstd_safe::compress(dst, src, level).map_err(|code| Error::Compress {
            codec: Self::NAME,
            code,
            message: zstd_safe::get_error_name(code).to_owned(),
        })
    }
}
