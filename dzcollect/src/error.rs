//! Error types for collection building.

use crate::coord::TileCoord;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building a collection.
///
/// All variants are fatal for the operation that raised them; whether a
/// per-item failure aborts the whole run is decided by the configured
/// [`ErrorPolicy`](crate::config::ErrorPolicy), not here.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The input directory held no candidate images.
    #[error("no images found in '{}'", dir.display())]
    NoImagesFound { dir: PathBuf },

    /// A source image or tile could not be read or decoded.
    #[error("failed to decode '{}': {source}", path.display())]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    /// An image could not be encoded to the output format.
    #[error("failed to encode '{}': {source}", path.display())]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },

    /// Filesystem failure, surfaced with the offending path.
    #[error("I/O error at '{}': {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    /// A source image has a zero width or height, which would make the
    /// shrink-factor computation undefined.
    #[error("image '{}' has degenerate dimensions {width}x{height}", path.display())]
    InvalidDimensions {
        path: PathBuf,
        width: u32,
        height: u32,
    },

    /// A tile write collided with an existing tile. The tile store contract
    /// is create-don't-overwrite.
    #[error("tile {coord} already exists")]
    TileExists { coord: TileCoord },
}

impl BuildError {
    /// Wraps an [`io::Error`] together with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Wraps a decode failure together with the offending path.
    pub fn decode(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::Decode {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_images_display() {
        let err = BuildError::NoImagesFound {
            dir: PathBuf::from("/tmp/empty"),
        };
        assert_eq!(err.to_string(), "no images found in '/tmp/empty'");
    }

    #[test]
    fn test_io_display_carries_path() {
        let err = BuildError::io(
            "/out/7/1_2.jpg",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/out/7/1_2.jpg"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_tile_exists_display() {
        let err = BuildError::TileExists {
            coord: TileCoord::new(2, 1, 0),
        };
        assert_eq!(err.to_string(), "tile 2/1_0 already exists");
    }

    #[test]
    fn test_invalid_dimensions_display() {
        let err = BuildError::InvalidDimensions {
            path: PathBuf::from("a.png"),
            width: 0,
            height: 34,
        };
        assert!(err.to_string().contains("0x34"));
    }
}
