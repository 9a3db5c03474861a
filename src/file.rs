//! Whole-file compression into a caller-owned buffer.

use crate::{
    chunked::display_name,
    encoding::{BlockCodec, ZstdCodec},
    error::{Error, Result},
    types::{self, Config},
};
use std::{fs::File, io::Read, path::Path};
use tracing::{error, info};

/// Compress the whole of `path` with zstd into `dst`.
pub fn compress_file(path: &Path, dst: &mut [u8], level: i32) -> Result<usize> {
    compress_file_with(&ZstdCodec, path, dst, level)
}

/// Compress the whole of `path` as a single block into `dst`.
///
/// `dst` must already hold the codec bound for the file size; it is never
/// grown here. Returns the compressed size.
pub fn compress_file_with<C: BlockCodec>(
    codec: &C,
    path: &Path,
    dst: &mut [u8],
    level: i32,
) -> Result<usize> {
    Config::default().with_level(level).validate()?;
    info!("Compressing file {} with level {}", path.display(), level);

    let mut file = File::open(path).map_err(|source| {
        error!("Failed to open {} for compression: {}", path.display(), source);
        Error::SourceUnreadable {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let mut src = Vec::new();
    file.read_to_end(&mut src).map_err(|source| {
        error!(
            "Failed reading {} after {} bytes: {}",
            path.display(),
            src.len(),
            source
        );
        Error::SourceReadFailed {
            path: path.to_path_buf(),
            offset: src.len() as u64,
            source,
        }
    })?;

    let required = codec.compress_bound(src.len());
    if dst.len() < required {
        error!(
            "Destination capacity {} too small, need >= {} for {}",
            dst.len(),
            required,
            path.display()
        );
        return Err(Error::DestinationTooSmall {
            path: path.to_path_buf(),
            capacity: dst.len(),
            required,
        });
    }

    let compressed = codec.compress(&src, dst, level).map_err(|source| {
        error!("Compression failed for {}: {}", path.display(), source);
        Error::CompressionFailed {
            file: display_name(path),
            chunk: 0,
            source,
        }
    })?;

    if src.is_empty() {
        info!(
            "Compressed {} (empty input) -> {} bytes",
            path.display(),
            compressed
        );
    } else {
        info!(
            "Compressed {} ({} bytes) -> {} bytes (ratio {:.3})",
            path.display(),
            src.len(),
            compressed,
            types::ratio(src.len(), compressed)
        );
    }

    Ok(compressed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn compresses_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.txt");
        let body = "lorem ipsum dolor sit amet ".repeat(200);
        fs::write(&path, &body).unwrap();

        let mut dst = vec![0u8; ZstdCodec.compress_bound(body.len())];
        let n = compress_file(&path, &mut dst, 3).unwrap();
        assert!(n < body.len());
        assert_eq!(zstd::decode_all(&dst[..n]).unwrap(), body.as_bytes());
    }

    #[test]
    fn undersized_destination_is_rejected_before_compressing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob");
        fs::write(&path, vec![1u8; 1000]).unwrap();

        let mut dst = vec![0u8; 16];
        let err = compress_file(&path, &mut dst, 3).unwrap_err();
        match err {
            Error::DestinationTooSmall {
                capacity, required, ..
            } => {
                assert_eq!(capacity, 16);
                assert_eq!(required, ZstdCodec.compress_bound(1000));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_file_still_produces_a_frame() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty");
        fs::write(&path, b"").unwrap();

        let mut dst = vec![0u8; ZstdCodec.compress_bound(0)];
        assert!(compress_file(&path, &mut dst, 3).unwrap() > 0);
    }

    #[test]
    fn missing_file_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let mut dst = vec![0u8; 64];
        let err = compress_file(&dir.path().join("nope"), &mut dst, 3).unwrap_err();
        assert!(matches!(err, Error::SourceUnreadable { .. }));
    }
}
