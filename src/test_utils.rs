//! Test utilities for chroma-cutout
//!
//! This module provides common fixtures for testing the cutout stages.
//! It is only compiled when running tests.

use image::Rgba;

use crate::utils::{is_opaque, TRANSPARENT};
use crate::Image;

/// Color used for every opaque pixel built by [`alpha_mask_from_rows`].
pub const FOREGROUND: Rgba<u8> = Rgba([0, 0, 255, 255]);

/// The orange key the painted templates are keyed against.
pub const ORANGE_KEY: Rgba<u8> = Rgba([255, 128, 0, 255]);

/// Builds an RGBA image from an ASCII picture of its alpha plane.
///
/// Each string is one row. `#` becomes [`FOREGROUND`], anything else becomes
/// fully transparent.
///
/// # Arguments
/// * `rows` - Equal-length rows, top to bottom
///
/// # Returns
/// An RGBA image of `rows[0].len()` x `rows.len()` pixels
pub fn alpha_mask_from_rows(rows: &[&str]) -> Image<Rgba<u8>> {
    let height = rows.len() as u32;
    let width = rows.first().map_or(0, |row| row.len()) as u32;
    let mut image: Image<Rgba<u8>> = Image::from_pixel(width, height, TRANSPARENT);

    for (y, row) in rows.iter().enumerate() {
        assert_eq!(row.len() as u32, width, "row {y} has the wrong length");
        for (x, cell) in row.bytes().enumerate() {
            if cell == b'#' {
                image.put_pixel(x as u32, y as u32, FOREGROUND);
            }
        }
    }

    image
}

/// Lists the coordinates of every pixel with alpha > 0, in row-major order.
pub fn opaque_pixels(image: &Image<Rgba<u8>>) -> Vec<(u32, u32)> {
    image
        .enumerate_pixels()
        .filter(|(_, _, pixel)| is_opaque(pixel))
        .map(|(x, y, _)| (x, y))
        .collect()
}

/// Creates a keyed template: an orange backdrop with a blue frame inset by
/// `inset` pixels on every side.
///
/// The frame's boundary with the backdrop carries a one pixel ring of
/// orange/blue blend, the kind of fringe a resized painting picks up.
///
/// # Arguments
/// * `width` - Width of the image to create
/// * `height` - Height of the image to create
/// * `inset` - Backdrop margin around the frame
pub fn create_keyed_template(width: u32, height: u32, inset: u32) -> Image<Rgba<u8>> {
    Image::from_fn(width, height, |x, y| {
        let inside = |margin: u32| {
            x >= margin && y >= margin && x < width - margin && y < height - margin
        };
        if inside(inset + 1) {
            FOREGROUND
        } else if inside(inset) {
            Rgba([128, 64, 128, 255])
        } else {
            ORANGE_KEY
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha_mask_from_rows_with_valid_input_creates_image() {
        let image = alpha_mask_from_rows(&["#.", ".#", "##"]);
        assert_eq!(image.dimensions(), (2, 3));
        assert_eq!(*image.get_pixel(0, 0), FOREGROUND);
        assert_eq!(*image.get_pixel(1, 0), TRANSPARENT);
        assert_eq!(opaque_pixels(&image), vec![(0, 0), (1, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn create_keyed_template_with_valid_input_creates_image() {
        let image = create_keyed_template(10, 10, 2);
        assert_eq!(*image.get_pixel(0, 0), ORANGE_KEY);
        assert_eq!(*image.get_pixel(1, 1), ORANGE_KEY);
        assert_eq!(*image.get_pixel(2, 2), Rgba([128, 64, 128, 255]));
        assert_eq!(*image.get_pixel(3, 3), FOREGROUND);
        assert_eq!(*image.get_pixel(6, 6), FOREGROUND);
        assert_eq!(*image.get_pixel(7, 7), Rgba([128, 64, 128, 255]));
        assert_eq!(*image.get_pixel(8, 8), ORANGE_KEY);
    }
}
