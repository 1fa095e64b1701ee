//! Pixel-level helpers for tile construction.
//!
//! Everything here operates on [`RgbaImage`] buffers: power-of-two box
//! downsampling, padding onto a fixed-size canvas, and quadrant placement.
//! Padding pixels are transparent background; content is never cropped.

use crate::coord::TILE_SIZE;
use image::{Rgba, RgbaImage};

/// Background pixel used for padding (transparent black).
pub const BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Smallest power of two `f` such that `longest_edge / f <= TILE_SIZE`.
///
/// Images that already fit a tile get factor 1.
pub fn shrink_factor(longest_edge: u32) -> u32 {
    debug_assert!(longest_edge > 0, "degenerate edge must be rejected upstream");
    let mut factor = 1u32;
    while longest_edge > TILE_SIZE * factor {
        factor <<= 1;
    }
    factor
}

/// Downsamples an image uniformly by an integer factor using a box filter.
///
/// Output dimensions are `ceil(w / factor) × ceil(h / factor)`; boxes at the
/// right/bottom edges shrink to the pixels that remain.
pub fn downsample(image: &RgbaImage, factor: u32) -> RgbaImage {
    if factor <= 1 {
        return image.clone();
    }
    let (w, h) = image.dimensions();
    let out_w = w.div_ceil(factor);
    let out_h = h.div_ceil(factor);
    let mut out = RgbaImage::new(out_w, out_h);

    for oy in 0..out_h {
        for ox in 0..out_w {
            let x0 = ox * factor;
            let y0 = oy * factor;
            let x1 = (x0 + factor).min(w);
            let y1 = (y0 + factor).min(h);

            let mut acc = [0u64; 4];
            for y in y0..y1 {
                for x in x0..x1 {
                    let px = image.get_pixel(x, y);
                    for (a, c) in acc.iter_mut().zip(px.0.iter()) {
                        *a += *c as u64;
                    }
                }
            }
            let count = ((x1 - x0) * (y1 - y0)) as u64;
            let px = Rgba([
                (acc[0] / count) as u8,
                (acc[1] / count) as u8,
                (acc[2] / count) as u8,
                (acc[3] / count) as u8,
            ]);
            out.put_pixel(ox, oy, px);
        }
    }
    out
}

/// Downsamples by a factor of 2, the load step for every reduction child.
#[inline]
pub fn halve(image: &RgbaImage) -> RgbaImage {
    downsample(image, 2)
}

/// Places an image onto a `width × height` background canvas at the origin,
/// padding the bottom/right with background pixels.
///
/// The input must not exceed the canvas; callers downsample first.
pub fn pad_to(image: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    debug_assert!(image.width() <= width && image.height() <= height);
    let mut canvas = RgbaImage::from_pixel(width, height, BACKGROUND);
    blit(&mut canvas, image, 0, 0);
    canvas
}

/// Copies `src` into `canvas` with its top-left corner at `(x, y)`.
///
/// Pixels falling outside the canvas are dropped.
pub fn blit(canvas: &mut RgbaImage, src: &RgbaImage, x: u32, y: u32) {
    let w = src.width().min(canvas.width().saturating_sub(x));
    let h = src.height().min(canvas.height().saturating_sub(y));
    for sy in 0..h {
        for sx in 0..w {
            canvas.put_pixel(x + sx, y + sy, *src.get_pixel(sx, sy));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(w: u32, h: u32, value: u8) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba([value, value, value, 255]))
    }

    #[test]
    fn test_shrink_factor_law() {
        assert_eq!(shrink_factor(1), 1);
        assert_eq!(shrink_factor(256), 1);
        assert_eq!(shrink_factor(257), 2);
        assert_eq!(shrink_factor(512), 2);
        assert_eq!(shrink_factor(513), 4);
        assert_eq!(shrink_factor(1024), 4);
        assert_eq!(shrink_factor(10_000), 64);
    }

    #[test]
    fn test_shrink_factor_is_smallest_power_of_two() {
        for edge in 1..5000u32 {
            let f = shrink_factor(edge);
            assert!(f.is_power_of_two());
            assert!(edge <= 256 * f, "edge {edge} does not fit with factor {f}");
            if f > 1 {
                // The next smaller power of two must not fit.
                assert!(edge > 256 * (f / 2));
                // Shrunk longest edge stays above half a tile.
                assert!(edge.div_ceil(f) > 128);
            }
        }
    }

    #[test]
    fn test_downsample_dimensions_round_up() {
        let img = solid(300, 200, 10);
        let out = downsample(&img, 2);
        assert_eq!(out.dimensions(), (150, 100));

        let odd = solid(301, 201, 10);
        let out = downsample(&odd, 2);
        assert_eq!(out.dimensions(), (151, 101));
    }

    #[test]
    fn test_downsample_box_average() {
        let mut img = RgbaImage::new(2, 2);
        img.put_pixel(0, 0, Rgba([0, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([100, 0, 0, 255]));
        img.put_pixel(0, 1, Rgba([100, 0, 0, 255]));
        img.put_pixel(1, 1, Rgba([200, 0, 0, 255]));
        let out = downsample(&img, 2);
        assert_eq!(out.dimensions(), (1, 1));
        assert_eq!(*out.get_pixel(0, 0), Rgba([100, 0, 0, 255]));
    }

    #[test]
    fn test_downsample_factor_one_is_identity() {
        let img = solid(33, 17, 77);
        assert_eq!(downsample(&img, 1), img);
    }

    #[test]
    fn test_pad_to_keeps_content_and_pads_bottom_right() {
        let img = solid(100, 50, 200);
        let padded = pad_to(&img, 256, 256);
        assert_eq!(padded.dimensions(), (256, 256));
        assert_eq!(*padded.get_pixel(99, 49), Rgba([200, 200, 200, 255]));
        assert_eq!(*padded.get_pixel(100, 0), BACKGROUND);
        assert_eq!(*padded.get_pixel(0, 50), BACKGROUND);
        assert_eq!(*padded.get_pixel(255, 255), BACKGROUND);
    }

    #[test]
    fn test_blit_quadrants() {
        let mut canvas = RgbaImage::from_pixel(256, 256, BACKGROUND);
        blit(&mut canvas, &solid(128, 128, 50), 128, 128);
        assert_eq!(*canvas.get_pixel(127, 127), BACKGROUND);
        assert_eq!(*canvas.get_pixel(128, 128), Rgba([50, 50, 50, 255]));
        assert_eq!(*canvas.get_pixel(255, 255), Rgba([50, 50, 50, 255]));
    }
}
