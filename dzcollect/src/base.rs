//! Base-level construction: one item, one thumbnail, one record.

use crate::codec;
use crate::collection::CollectionItem;
use crate::coord::{morton_coords, TileCoord, TILE_SIZE};
use crate::dzi::PyramidEncoder;
use crate::error::BuildError;
use crate::raster;
use crate::store::TileStore;
use image::RgbaImage;
use std::path::Path;
use tracing::debug;

/// Builds the deepest collection level, one source image at a time.
///
/// For each item the builder decodes the source, delegates the item's own
/// pyramid to the [`PyramidEncoder`], places a padded 256×256 thumbnail at
/// the item's Morton address, and returns the manifest record. Items are
/// independent of each other, so `build_item` is safe to call from
/// concurrent workers.
pub struct BaseLevelBuilder<'a> {
    store: &'a dyn TileStore,
    encoder: &'a dyn PyramidEncoder,
    output_dir: &'a Path,
    max_level: u32,
    bit_depth: u32,
}

impl<'a> BaseLevelBuilder<'a> {
    /// Creates a builder for a collection with the given derived constants.
    pub fn new(
        store: &'a dyn TileStore,
        encoder: &'a dyn PyramidEncoder,
        output_dir: &'a Path,
        max_level: u32,
        bit_depth: u32,
    ) -> Self {
        Self {
            store,
            encoder,
            output_dir,
            max_level,
            bit_depth,
        }
    }

    /// Processes one source image under the given id.
    pub fn build_item(&self, id: u32, source_path: &Path) -> Result<CollectionItem, BuildError> {
        let image = codec::read_image(source_path)?;
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(BuildError::InvalidDimensions {
                path: source_path.to_path_buf(),
                width,
                height,
            });
        }

        self.encoder
            .encode(&image, &self.output_dir.join(id.to_string()))?;

        let coord = self.thumbnail_coord(id);
        debug!(id, source = %source_path.display(), %coord, "placing base thumbnail");
        self.store.write(coord, &thumbnail(&image))?;

        Ok(CollectionItem {
            id,
            source_path: source_path.to_path_buf(),
            width,
            height,
        })
    }

    /// Morton-addressed tile coordinate of an item's thumbnail.
    pub fn thumbnail_coord(&self, id: u32) -> TileCoord {
        let m = morton_coords(id, self.bit_depth);
        TileCoord::new(self.max_level, m.row, m.col)
    }
}

/// Downsamples an image so its longest edge fits one tile, then pads the
/// bottom/right to exactly 256×256. Content is never cropped.
pub fn thumbnail(image: &RgbaImage) -> RgbaImage {
    let factor = raster::shrink_factor(image.width().max(image.height()));
    let small = raster::downsample(image, factor);
    raster::pad_to(&small, TILE_SIZE, TILE_SIZE)
}
