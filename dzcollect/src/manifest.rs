//! Collection descriptor (`.dzc`) serialization.
//!
//! The manifest is rendered in memory from the completed item list and
//! written exactly once, after every item has been processed and before
//! level reduction starts. Its content does not depend on reduction.

use crate::collection::Collection;
use crate::dzi::DEEPZOOM_XMLNS;
use crate::error::BuildError;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Renders the `.dzc` XML for a completed collection.
///
/// One `<I>` entry per item, in id order; `N` duplicates the id as the
/// sequence number and `Source` points at the item's own pyramid
/// descriptor.
pub fn render(collection: &Collection) -> String {
    let mut xml = String::new();
    let _ = writeln!(xml, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    let _ = writeln!(
        xml,
        r#"<Collection MaxLevel="{}" TileSize="{}" Format="{}" NextItemId="{}" xmlns="{DEEPZOOM_XMLNS}">"#,
        collection.max_level,
        collection.tile_size,
        collection.format,
        collection.item_count(),
    );
    xml.push_str("<Items>\n");
    for item in &collection.items {
        let _ = writeln!(
            xml,
            r#"  <I Id="{id}" N="{id}" IsPath="1" Source="{id}.dzi">"#,
            id = item.id
        );
        let _ = writeln!(
            xml,
            r#"    <Size Width="{}" Height="{}"/>"#,
            item.width, item.height
        );
        xml.push_str("  </I>\n");
    }
    xml.push_str("</Items>\n</Collection>\n");
    xml
}

/// Writes the rendered manifest to `path`.
pub fn write(collection: &Collection, path: &Path) -> Result<(), BuildError> {
    fs::write(path, render(collection)).map_err(|e| BuildError::io(path, e))
}
