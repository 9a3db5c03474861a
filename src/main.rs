use anyhow::Result;
use blockpress::{Config, KB, MB, compress_dir};
use clap::Parser;
use std::path::PathBuf;
use tracing::{Level, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about = "Compress every file in a directory in fixed-size zstd blocks")]
struct Args {
    /// Directory of input files
    #[arg(default_value = "data/raw/silesia")]
    dataset: PathBuf,

    /// Root directory for per-file chunk directories
    #[arg(short, long, default_value = "data/output/silesia_chunks")]
    output: PathBuf,

    /// Block size in bytes
    #[arg(short, long, default_value_t = 1 * MB)]
    block_size: usize,

    /// zstd compression level
    #[arg(short, long, default_value_t = zstd::DEFAULT_COMPRESSION_LEVEL, allow_negative_numbers = true)]
    level: i32,

    /// Only log statistics, do not write chunk files
    #[arg(long)]
    no_persist: bool,

    /// Request sub-block compression (not implemented, falls back to full blocks)
    #[arg(long)]
    partial_read: bool,

    /// Sub-block size in bytes used with --partial-read
    #[arg(long, default_value_t = 64 * KB)]
    inner_block_size: usize,

    /// Log level, overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    log_level: Level,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level.as_str().to_lowercase()));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(filter)
        .init();

    let cfg = Config {
        block_size: args.block_size,
        level: args.level,
        persist_chunks: !args.no_persist,
        partial_read: args.partial_read,
        inner_block_size: args.inner_block_size,
    };
    info!("Configuration: {:?}", cfg);

    let report = compress_dir(&args.dataset, &args.output, &cfg)?;
    for (path, err) in &report.failed {
        warn!("Skipped {}: {}", path.display(), err);
    }
    let (bytes_in, bytes_out) = report
        .processed
        .iter()
        .fold((0usize, 0usize), |(i, o), f| (i + f.bytes_in(), o + f.bytes_out()));
    info!(
        "{} files ok, {} failed, {} bytes -> {} bytes",
        report.processed_count(),
        report.failed.len(),
        bytes_in,
        bytes_out
    );

    Ok(())
}
