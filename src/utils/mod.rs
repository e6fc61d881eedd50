//! Internal utility functions for chroma-cutout.
//!
//! This module contains common functionality used across the cutout stages.

use image::{Luma, Rgba};
use imageproc::map::map_colors;

use crate::error::CutoutError;
use crate::Image;

/// The value every cleared pixel is written as.
///
/// RGB is zeroed along with alpha so that nothing downstream reads color
/// from under a fully transparent pixel.
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Returns `true` if the pixel has any coverage at all.
#[inline]
pub const fn is_opaque(pixel: &Rgba<u8>) -> bool {
    pixel.0[3] > 0
}

/// Validates that an image has non-zero dimensions.
///
/// # Arguments
///
/// * `width` - The width of the image
/// * `height` - The height of the image
///
/// # Returns
///
/// `Ok(())` if the dimensions are valid, otherwise [`CutoutError::EmptyImage`]
pub const fn validate_non_empty_image(width: u32, height: u32) -> Result<(), CutoutError> {
    if width == 0 || height == 0 {
        Err(CutoutError::EmptyImage { width, height })
    } else {
        Ok(())
    }
}

/// Copies the alpha channel of an RGBA image into its own plane.
///
/// The copy is independent of the source, so the source can be mutated
/// while decisions are still read from the snapshot.
pub fn alpha_plane(image: &Image<Rgba<u8>>) -> Image<Luma<u8>> {
    map_colors(image, |Rgba([_, _, _, alpha])| Luma([alpha]))
}

/// Counts pixels with non-zero alpha.
pub fn count_opaque(image: &Image<Rgba<u8>>) -> usize {
    image.pixels().filter(|pixel| is_opaque(pixel)).count()
}
