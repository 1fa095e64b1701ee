//! Collection data model.

use crate::coord::{max_level_for, TILE_SIZE};
use std::path::PathBuf;

/// One source image, as recorded in the collection manifest.
///
/// Created during enumeration and immutable thereafter. The id equals the
/// item's 0-based enumeration index; ids are unique and contiguous across
/// the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionItem {
    /// 0-based enumeration index, doubling as the Morton placement key
    pub id: u32,
    /// Path of the source image the item was built from
    pub source_path: PathBuf,
    /// Native pixel width of the source image
    pub width: u32,
    /// Native pixel height of the source image
    pub height: u32,
}

/// A completed collection: the constants the manifest carries plus the
/// ordered item list.
#[derive(Debug, Clone)]
pub struct Collection {
    /// Deepest pyramid level, `floor(log2(item_count))`
    pub max_level: u32,
    /// Fixed tile side length (256)
    pub tile_size: u32,
    /// Tile file extension, e.g. "jpg"
    pub format: String,
    /// Items in enumeration order; index equals id
    pub items: Vec<CollectionItem>,
}

impl Collection {
    /// Assembles a collection from its completed item list.
    ///
    /// # Panics
    ///
    /// Panics on an empty item list; the builder rejects empty inputs long
    /// before a `Collection` is assembled.
    pub fn new(items: Vec<CollectionItem>, format: impl Into<String>) -> Self {
        let max_level = max_level_for(items.len() as u32);
        Self {
            max_level,
            tile_size: TILE_SIZE,
            format: format.into(),
            items,
        }
    }

    /// Number of items in the collection.
    pub fn item_count(&self) -> u32 {
        self.items.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u32) -> CollectionItem {
        CollectionItem {
            id,
            source_path: PathBuf::from(format!("img{id}.png")),
            width: 640,
            height: 480,
        }
    }

    #[test]
    fn test_single_item_collection_is_flat() {
        let collection = Collection::new(vec![item(0)], "jpg");
        assert_eq!(collection.max_level, 0);
        assert_eq!(collection.tile_size, 256);
        assert_eq!(collection.item_count(), 1);
    }

    #[test]
    fn test_max_level_tracks_item_count() {
        let collection = Collection::new((0..5).map(item).collect(), "jpg");
        assert_eq!(collection.max_level, 2);
        assert_eq!(collection.item_count(), 5);
    }
}
