//! Fixed-size chunked compression of a single file.
//!
//! The file is read `block_size` bytes at a time and each block is compressed
//! on its own. With `persist_chunks` every block lands in
//! `<output_root>/<stem>/<file_name>_chunkNNNN.<ext>`.

use crate::{
    block::{ScratchBuffers, compress_block},
    encoding::{BlockCodec, ZstdCodec},
    error::{Error, Result},
    types::{ChunkStats, Config, FileReport},
};
use std::{
    fs::{self, File},
    io::Read,
    path::{Path, PathBuf},
};
use tracing::{error, info, warn};

/// Chunked compression with zstd. See [`compress_file_in_chunks_with`].
pub fn compress_file_in_chunks(
    input: &Path,
    output_root: &Path,
    cfg: &Config,
    scratch: &mut ScratchBuffers,
) -> Result<FileReport> {
    compress_file_in_chunks_with(&ZstdCodec, input, output_root, cfg, scratch)
}

/// Compress `input` block by block.
///
/// Any error stops the file immediately. Artifacts written for earlier chunks
/// are left in place; a failed file has to be redone from the start.
///
/// With `persist_chunks` the per-file directory is created before the first
/// read, so an empty input leaves that directory behind with no artifacts.
pub fn compress_file_in_chunks_with<C: BlockCodec>(
    codec: &C,
    input: &Path,
    output_root: &Path,
    cfg: &Config,
    scratch: &mut ScratchBuffers,
) -> Result<FileReport> {
    cfg.validate()?;

    let mut reader = File::open(input).map_err(|source| {
        error!("Failed to open {}: {}", input.display(), source);
        Error::SourceUnreadable {
            path: input.to_path_buf(),
            source,
        }
    })?;

    let output_dir = if cfg.persist_chunks {
        let dir = output_root.join(input.file_stem().unwrap_or(input.as_os_str()));
        fs::create_dir_all(&dir).map_err(|source| {
            error!(
                "Failed to create output directory {}: {}",
                dir.display(),
                source
            );
            Error::OutputDirUncreatable {
                path: dir.clone(),
                source,
            }
        })?;
        Some(dir)
    } else {
        None
    };

    compress_blocks(codec, &mut reader, input, output_dir, cfg, scratch)
}

/// The read/compress/persist loop behind [`compress_file_in_chunks_with`].
fn compress_blocks<C: BlockCodec, R: Read>(
    codec: &C,
    reader: &mut R,
    input: &Path,
    output_dir: Option<PathBuf>,
    cfg: &Config,
    scratch: &mut ScratchBuffers,
) -> Result<FileReport> {
    let file_name = display_name(input);
    let mut report = FileReport {
        input: input.to_path_buf(),
        output_dir,
        chunks: Vec::new(),
    };
    let ScratchBuffers { src, dst } = scratch;
    let mut offset = 0u64;

    loop {
        let read = read_block(reader, src, cfg.block_size).map_err(|source| {
            error!(
                "Failed reading {} at offset {}: {}",
                input.display(),
                offset,
                source
            );
            Error::SourceReadFailed {
                path: input.to_path_buf(),
                offset,
                source,
            }
        })?;
        if read == 0 {
            break;
        }

        let index = report.chunks.len();
        let compressed = compress_block(codec, &src[..read], cfg, dst).map_err(|source| {
            error!(
                "Compression failed for {} chunk {:04}: {}",
                file_name, index, source
            );
            Error::CompressionFailed {
                file: file_name.clone(),
                chunk: index,
                source,
            }
        })?;

        let mut stats = ChunkStats::new(index, read, compressed);
        if let Some(dir) = &report.output_dir {
            let path = dir.join(artifact_name::<C>(&file_name, index));
            fs::write(&path, &dst[..compressed]).map_err(|source| {
                error!(
                    "Failed to write compressed data to {}: {}",
                    path.display(),
                    source
                );
                Error::ArtifactWriteFailed {
                    path: path.clone(),
                    source,
                }
            })?;
            stats.artifact = Some(path);
        }

        info!(
            "Compressed {} chunk {:04} ({} bytes -> {} bytes, ratio {:.3})",
            file_name, index, read, compressed, stats.ratio
        );
        report.chunks.push(stats);
        offset += read as u64;
    }

    if report.is_empty() {
        warn!("{} is empty; no chunks produced", input.display());
    } else {
        info!(
            "Finished {} chunks for {}",
            report.chunk_count(),
            file_name
        );
    }

    Ok(report)
}

/// `<file_name>_chunkNNNN.<ext>`
pub fn artifact_name<C: BlockCodec>(file_name: &str, index: usize) -> String {
    format!("{file_name}_chunk{index:04}.{}", C::EXTENSION)
}

/// Path of the artifact for chunk `index` of `input` under `output_root`.
pub fn artifact_path<C: BlockCodec>(input: &Path, output_root: &Path, index: usize) -> PathBuf {
    output_root
        .join(input.file_stem().unwrap_or(input.as_os_str()))
        .join(artifact_name::<C>(&display_name(input), index))
}

pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}

/// Fill `buf` with up to `block_size` bytes. Only a full block or end of file
/// ends a read, so every chunk but the last is exactly `block_size` long.
fn read_block<R: Read>(
    reader: &mut R,
    buf: &mut Vec<u8>,
    block_size: usize,
) -> std::io::Result<usize> {
    buf.clear();
    // with no spare capacity read_to_end only probes for EOF, so the buffer stays at block_size
    buf.reserve_exact(block_size);
    reader.by_ref().take(block_size as u64).read_to_end(buf)
}
