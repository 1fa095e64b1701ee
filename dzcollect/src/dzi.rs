//! Per-item Deep Zoom Image (DZI) pyramids.
//!
//! Every source image gets its own full pyramid, independent of the
//! collection: levels from `ceil(log2(longest_edge))` down to a 1×1 level 0,
//! each level cut into `TILE_SIZE` tiles written as
//! `{base}_files/{level}/{col}_{row}.{ext}`, plus an XML descriptor at
//! `{base}.dzi`.
//!
//! The encoder sits behind [`PyramidEncoder`] so the collection builder can
//! be exercised with a mock in tests.

use crate::codec;
use crate::config::TileFormat;
use crate::coord::TILE_SIZE;
use crate::error::BuildError;
use crate::raster;
use image::imageops;
use image::RgbaImage;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tracing::debug;

/// XML namespace shared by DZI and DZC descriptors.
pub const DEEPZOOM_XMLNS: &str = "http://schemas.microsoft.com/deepzoom/2008";

/// Capability to build a standalone multi-resolution pyramid for one image,
/// rooted at a given output base path.
pub trait PyramidEncoder: Send + Sync {
    /// Builds the pyramid for `image` at `base` (no extension): descriptor
    /// at `{base}.dzi`, tiles under `{base}_files/`.
    fn encode(&self, image: &RgbaImage, base: &Path) -> Result<(), BuildError>;
}

/// Default DZI encoder: no tile overlap, repeated 2× box halving between
/// levels.
pub struct DziEncoder {
    format: TileFormat,
    jpeg_quality: u8,
}

impl DziEncoder {
    /// Creates an encoder for the given tile format.
    pub fn new(format: TileFormat, jpeg_quality: u8) -> Self {
        Self {
            format,
            jpeg_quality,
        }
    }

    /// Number of the finest level for an image with the given longest edge:
    /// `ceil(log2(longest_edge))`, 0 for a single-pixel image.
    pub fn max_level(longest_edge: u32) -> u32 {
        debug_assert!(longest_edge > 0);
        if longest_edge.is_power_of_two() {
            longest_edge.ilog2()
        } else {
            longest_edge.ilog2() + 1
        }
    }

    fn write_level(&self, image: &RgbaImage, level_dir: &Path) -> Result<(), BuildError> {
        fs::create_dir_all(level_dir).map_err(|e| BuildError::io(level_dir, e))?;
        let (w, h) = image.dimensions();
        for ty in 0..h.div_ceil(TILE_SIZE) {
            for tx in 0..w.div_ceil(TILE_SIZE) {
                let x = tx * TILE_SIZE;
                let y = ty * TILE_SIZE;
                let tile = imageops::crop_imm(
                    image,
                    x,
                    y,
                    TILE_SIZE.min(w - x),
                    TILE_SIZE.min(h - y),
                )
                .to_image();
                // DZI tile naming is column-first.
                let path = level_dir.join(format!("{}_{}.{}", tx, ty, self.format.extension()));
                codec::write_image_new(&path, &tile, self.format, self.jpeg_quality)?;
            }
        }
        Ok(())
    }

    fn render_descriptor(&self, width: u32, height: u32) -> String {
        let mut xml = String::new();
        let _ = writeln!(xml, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        let _ = writeln!(
            xml,
            r#"<Image TileSize="{TILE_SIZE}" Overlap="0" Format="{}" xmlns="{DEEPZOOM_XMLNS}">"#,
            self.format.extension()
        );
        let _ = writeln!(xml, r#"  <Size Width="{width}" Height="{height}"/>"#);
        xml.push_str("</Image>\n");
        xml
    }
}

impl PyramidEncoder for DziEncoder {
    fn encode(&self, image: &RgbaImage, base: &Path) -> Result<(), BuildError> {
        let (width, height) = image.dimensions();
        let stem = base
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let files_dir = base.with_file_name(format!("{stem}_files"));
        let max_level = Self::max_level(width.max(height));
        debug!(base = %base.display(), width, height, max_level, "encoding item pyramid");

        let mut current = image.clone();
        for level in (0..=max_level).rev() {
            self.write_level(&current, &files_dir.join(level.to_string()))?;
            if level > 0 {
                current = raster::halve(&current);
            }
        }

        let descriptor_path = base.with_extension("dzi");
        fs::write(&descriptor_path, self.render_descriptor(width, height))
            .map_err(|e| BuildError::io(&descriptor_path, e))
    }
}
