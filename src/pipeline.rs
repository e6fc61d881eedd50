//! The cutout pipeline: key, mask, erode, crop.
//!
//! Every stage works in place on one RGBA buffer, in a fixed order:
//!
//! 1. sample the key at (0,0) and clear every pixel that matches it
//! 2. clear the configured mask region
//! 3. erode the opaque region's edges
//! 4. crop to the bounding box of what is left

use image::Rgba;
use log::{debug, info, log_enabled, Level};

use crate::config::CutoutConfig;
use crate::error::CutoutError;
use crate::stages::classifier::{KeyRemoval, RemoveKeyColor};
use crate::stages::clip_transparent_border::ClipTransparentBorder;
use crate::stages::erode_edges::ErodeEdges;
use crate::stages::region_mask::ClearRegion;
use crate::utils::count_opaque;
use crate::Image;

/// Runs stages 1 to 3 in place, leaving the image at its original size.
///
/// # Errors
///
/// * `CutoutError::EmptyImage` - the image has a zero dimension
pub fn remove_background(
    image: &mut Image<Rgba<u8>>,
    config: &CutoutConfig,
) -> Result<KeyRemoval, CutoutError> {
    let removal = image.remove_key_color(&config.classifier)?;
    debug!(
        "Key color at (0,0): {:?}, keyed out {} pixels",
        removal.key.0, removal.cleared
    );

    if let Some(region) = &config.mask_region {
        if let Some(bounds) = image.clear_region(region) {
            debug!(
                "Cleared {:?} mask region ({}, {}, {}, {})",
                region.corner, bounds.left, bounds.top, bounds.right, bounds.bottom
            );
        }
    }

    if config.erosion_passes > 0 {
        let eroded = image.erode_edges(config.erosion_passes);
        debug!(
            "Eroded {} fringe pixels over {} pass(es)",
            eroded, config.erosion_passes
        );
    }

    if log_enabled!(Level::Debug) {
        debug!("{} opaque pixels remain", count_opaque(image));
    }

    Ok(removal)
}

/// Runs the whole pipeline and returns the cropped cutout.
///
/// # Errors
///
/// * `CutoutError::EmptyImage` - the image has a zero dimension
/// * `CutoutError::EmptyResult` - nothing visible is left to crop to
pub fn cutout(
    mut image: Image<Rgba<u8>>,
    config: &CutoutConfig,
) -> Result<Image<Rgba<u8>>, CutoutError> {
    let (width, height) = image.dimensions();
    remove_background(&mut image, config)?;

    let bounds = image.opaque_bounds().ok_or(CutoutError::EmptyResult)?;
    info!(
        "Crop bounds: ({}, {}, {}, {}) of {}x{}",
        bounds.left, bounds.top, bounds.right, bounds.bottom, width, height
    );

    Ok(image.crop_to(&bounds))
}
