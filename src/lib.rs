//! `blockpress` – fixed-size block compression experiments over zstd.
//!
//! * A file is read in `block_size` blocks; every block is compressed on its own into a
//!   reusable scratch buffer grown to the codec's worst-case bound, never shrunk.
//! * With `persist_chunks`, block _i_ of `dir/name.ext` is written raw to
//!   `<output_root>/name/name.ext_chunk000i.zst`. No header, no checksum.
//! * Any failure aborts the current file only; [`compress_dir`] records it and moves on.
//!
//! SPDX‑License‑Identifier: Apache‑2.0 OR MIT

mod batch;
mod block;
mod chunked;
mod encoding;
mod error;
mod file;
mod types;

pub use batch::{compress_dir, compress_dir_with};
pub use block::{ScratchBuffers, compress_block};
pub use chunked::{
    artifact_name, artifact_path, compress_file_in_chunks, compress_file_in_chunks_with,
};
pub use encoding::{BlockCodec, Error as CodecError, ZstdCodec};
pub use error::{Error, Result};
pub use file::{compress_file, compress_file_with};
pub use types::{BatchReport, BlockStrategy, ChunkStats, Config, FileReport, GB, KB, MB};
