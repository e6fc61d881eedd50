use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::stages::clip_transparent_border::BoundingBox;
use crate::utils::TRANSPARENT;
use crate::Image;

/// Image corner a mask region is anchored to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
}

/// A square that is always cleared, whatever the classifier decided
///
/// Meant for a fixed-position artifact such as a watermark or an icon that
/// does not match the key closely enough to be keyed out. The defaults
/// describe one known template layout; they are not derived from the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskRegion {
    /// Edge length of the square, in pixels.
    pub box_size: u32,
    pub corner: Corner,
}

impl MaskRegion {
    pub const DEFAULT_BOX_SIZE: u32 = 150;

    /// Pixel rectangle covered in an image of the given size.
    ///
    /// The square is clamped to the image, so a box larger than either
    /// dimension covers that whole dimension. Returns `None` when the
    /// clamped rectangle has no area.
    #[must_use]
    pub fn bounds(&self, width: u32, height: u32) -> Option<BoundingBox> {
        let box_width = self.box_size.min(width);
        let box_height = self.box_size.min(height);
        if box_width == 0 || box_height == 0 {
            return None;
        }

        let (left, top) = match self.corner {
            Corner::TopLeft => (0, 0),
            Corner::TopRight => (width - box_width, 0),
            Corner::BottomLeft => (0, height - box_height),
            Corner::BottomRight => (width - box_width, height - box_height),
        };

        Some(BoundingBox {
            left,
            top,
            right: left + box_width,
            bottom: top + box_height,
        })
    }
}

impl Default for MaskRegion {
    fn default() -> Self {
        Self {
            box_size: Self::DEFAULT_BOX_SIZE,
            corner: Corner::default(),
        }
    }
}

/// Forces a fixed region of the image to full transparency
pub trait ClearRegion {
    /// Clears every pixel inside `region` and returns the rectangle that was
    /// actually cleared after clamping.
    fn clear_region(&mut self, region: &MaskRegion) -> Option<BoundingBox>;
}

impl ClearRegion for Image<Rgba<u8>> {
    fn clear_region(&mut self, region: &MaskRegion) -> Option<BoundingBox> {
        let (width, height) = self.dimensions();
        let bounds = region.bounds(width, height)?;

        for y in bounds.top..bounds.bottom {
            for x in bounds.left..bounds.right {
                self.put_pixel(x, y, TRANSPARENT);
            }
        }

        Some(bounds)
    }
}
