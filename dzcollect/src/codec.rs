//! Tile encode/decode on top of the `image` crate.
//!
//! JPEG has no alpha channel, so RGBA buffers are flattened to RGB on the
//! way out; padding background therefore encodes as black, matching the
//! conventional Deep Zoom `embed` behavior.

use crate::config::TileFormat;
use crate::error::BuildError;
use image::codecs::jpeg::JpegEncoder;
use image::{ImageFormat, Rgb, RgbImage, RgbaImage};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Decodes an image file into an RGBA buffer.
pub fn read_image(path: &Path) -> Result<RgbaImage, BuildError> {
    let img = image::open(path).map_err(|e| BuildError::decode(path, e))?;
    Ok(img.to_rgba8())
}

/// Encodes an RGBA buffer to `format` and writes it through `writer`.
pub fn encode_image<W: Write>(
    image: &RgbaImage,
    format: TileFormat,
    quality: u8,
    writer: &mut W,
    path: &Path,
) -> Result<(), BuildError> {
    match format {
        TileFormat::Jpeg => {
            let rgb = flatten(image);
            JpegEncoder::new_with_quality(writer, quality)
                .encode_image(&rgb)
                .map_err(|e| BuildError::Encode {
                    path: path.to_path_buf(),
                    source: e,
                })
        }
        TileFormat::Png => {
            let mut buf = Vec::new();
            image
                .write_to(&mut std::io::Cursor::new(&mut buf), ImageFormat::Png)
                .map_err(|e| BuildError::Encode {
                    path: path.to_path_buf(),
                    source: e,
                })?;
            writer.write_all(&buf).map_err(|e| BuildError::io(path, e))
        }
    }
}

/// Creates `path` (fail if it exists) and writes the encoded image into it.
pub fn write_image_new(
    path: &Path,
    image: &RgbaImage,
    format: TileFormat,
    quality: u8,
) -> Result<(), BuildError> {
    let file = File::options()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| BuildError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    encode_image(image, format, quality, &mut writer, path)?;
    writer.flush().map_err(|e| BuildError::io(path, e))
}

fn flatten(image: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let px = image.get_pixel(x, y);
        Rgb([px[0], px[1], px[2]])
    })
}
