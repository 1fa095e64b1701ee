//! dzcollect CLI - build Deep Zoom collections from a directory of images.

mod error;

use clap::{Parser, ValueEnum};
use dzcollect::builder::CollectionBuilder;
use dzcollect::config::{BuildConfig, ErrorPolicy, TileFormat};
use dzcollect::logging::init_logging;
use error::CliError;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    /// JPEG tiles (quality set by --quality)
    Jpg,
    /// Lossless PNG tiles
    Png,
}

#[derive(Parser)]
#[command(name = "dzcollect", version = dzcollect::VERSION)]
#[command(about = "Build a Deep Zoom collection (.dzc) from a directory of images", long_about = None)]
struct Args {
    /// Directory containing the source images
    input_dir: PathBuf,

    /// Directory to write the collection into (created if missing)
    output_dir: PathBuf,

    /// Base name of the collection ("gallery" produces gallery.dzc)
    output_name: String,

    /// Tile format
    #[arg(long, value_enum, default_value = "jpg")]
    format: OutputFormat,

    /// JPEG encoding quality (1-100)
    #[arg(long, default_value = "90")]
    quality: u8,

    /// Number of worker threads (default: number of CPU cores)
    #[arg(long)]
    threads: Option<usize>,

    /// Skip unreadable images instead of aborting the whole run
    #[arg(long)]
    skip_failed: bool,

    /// Log level when RUST_LOG is not set (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = init_logging(&args.log_level) {
        CliError::LoggingInit(e).exit();
    }

    let mut config = BuildConfig::default()
        .with_tile_format(match args.format {
            OutputFormat::Jpg => TileFormat::Jpeg,
            OutputFormat::Png => TileFormat::Png,
        })
        .with_jpeg_quality(args.quality)
        .with_error_policy(if args.skip_failed {
            ErrorPolicy::Skip
        } else {
            ErrorPolicy::Abort
        });
    if let Some(threads) = args.threads {
        config = config.with_threads(threads);
    }

    let builder = CollectionBuilder::new(config);
    match builder.build(&args.input_dir, &args.output_dir, &args.output_name) {
        Ok(report) => {
            if !report.skipped.is_empty() {
                info!(count = report.skipped.len(), "skipped unreadable images");
            }
            info!(
                items = report.item_count,
                levels = report.max_level + 1,
                manifest = %report.manifest_path.display(),
                "collection build complete"
            );
        }
        Err(e) => CliError::from(e).exit(),
    }
}
