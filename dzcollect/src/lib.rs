//! dzcollect - Deep Zoom collection pyramid builder
//!
//! Turns a directory of images into a Deep Zoom collection: every image gets
//! its own DZI pyramid, and a combined collection pyramid places one 256×256
//! thumbnail per image at a Morton-interleaved grid position on the deepest
//! level, then merges 2×2 tile blocks upward until a single root tile
//! remains.
//!
//! # High-Level API
//!
//! ```ignore
//! use dzcollect::builder::CollectionBuilder;
//! use dzcollect::config::BuildConfig;
//!
//! let builder = CollectionBuilder::new(BuildConfig::default());
//! let report = builder.build(input_dir, output_dir, "gallery")?;
//! println!("built {} items, {} levels", report.item_count, report.max_level + 1);
//! ```

pub mod base;
pub mod builder;
pub mod codec;
pub mod collection;
pub mod config;
pub mod coord;
pub mod dzi;
pub mod error;
pub mod logging;
pub mod manifest;
mod pool;
pub mod raster;
pub mod reduce;
pub mod store;

/// Version of the dzcollect library and CLI.
///
/// Synchronized across the workspace; defined in `Cargo.toml` and injected
/// at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
