//! Directory driver: chunk-compress every regular file in a dataset directory.

use crate::{
    block::ScratchBuffers,
    chunked::compress_file_in_chunks_with,
    encoding::{BlockCodec, ZstdCodec},
    error::{Error, Result},
    types::{BatchReport, Config},
};
use std::{fs, path::Path};
use tracing::{error, info};

pub fn compress_dir(dataset_dir: &Path, output_root: &Path, cfg: &Config) -> Result<BatchReport> {
    compress_dir_with(&ZstdCodec, dataset_dir, output_root, cfg)
}

/// Files are visited in file-name order with one shared scratch pair. A file
/// that fails is recorded and skipped; only setup problems fail the batch.
pub fn compress_dir_with<C: BlockCodec>(
    codec: &C,
    dataset_dir: &Path,
    output_root: &Path,
    cfg: &Config,
) -> Result<BatchReport> {
    cfg.validate()?;

    if !dataset_dir.is_dir() {
        error!(
            "Dataset directory not found or not a directory: {}",
            dataset_dir.display()
        );
        return Err(Error::NotADirectory(dataset_dir.to_path_buf()));
    }

    fs::create_dir_all(output_root).map_err(|source| {
        error!(
            "Failed to create output root {}: {}",
            output_root.display(),
            source
        );
        Error::OutputDirUncreatable {
            path: output_root.to_path_buf(),
            source,
        }
    })?;

    let mut entries = fs::read_dir(dataset_dir)?.collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.file_name());

    let mut scratch = ScratchBuffers::for_config(codec, cfg);
    let mut report = BatchReport::default();

    for entry in entries {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        info!("Processing {}", path.display());
        match compress_file_in_chunks_with(codec, &path, output_root, cfg, &mut scratch) {
            Ok(file) => report.processed.push(file),
            Err(e) => report.failed.push((path, e)),
        }
    }

    info!(
        "Completed processing {} files from {}",
        report.processed_count(),
        dataset_dir.display()
    );
    Ok(report)
}
