use image::{GenericImageView, Rgba};

use crate::error::CutoutError;
use crate::utils::is_opaque;
use crate::Image;

/// Axis-aligned pixel rectangle with exclusive right and bottom edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl BoundingBox {
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.right - self.left
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        self.bottom - self.top
    }

    #[must_use]
    pub const fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }
}

/// Trims fully transparent rows and columns from the image edges
pub trait ClipTransparentBorder: Sized {
    /// Finds the tightest box around every pixel with alpha > 0.
    ///
    /// Returns `None` for an image with no visible pixel.
    fn opaque_bounds(&self) -> Option<BoundingBox>;

    /// Copies out the pixels inside `bounds`, which must lie within the image.
    #[must_use]
    fn crop_to(&self, bounds: &BoundingBox) -> Self;

    /// Crops to [`opaque_bounds`](Self::opaque_bounds) with no padding.
    ///
    /// # Errors
    ///
    /// * `CutoutError::EmptyResult` - no pixel has alpha > 0
    fn clip_transparent_border(&self) -> Result<Self, CutoutError>;
}

impl ClipTransparentBorder for Image<Rgba<u8>> {
    fn opaque_bounds(&self) -> Option<BoundingBox> {
        let (width, height) = self.dimensions();
        let mut bounds = [width, height, 0, 0]; // [x1, y1, x2, y2]
        let mut found = false;

        for (x, y, pixel) in self.enumerate_pixels() {
            if is_opaque(pixel) {
                update_bounds(&mut bounds, x, y);
                found = true;
            }
        }

        found.then(|| BoundingBox {
            left: bounds[0],
            top: bounds[1],
            right: bounds[2] + 1,
            bottom: bounds[3] + 1,
        })
    }

    fn crop_to(&self, bounds: &BoundingBox) -> Self {
        self.view(bounds.left, bounds.top, bounds.width(), bounds.height())
            .to_image()
    }

    fn clip_transparent_border(&self) -> Result<Self, CutoutError> {
        let bounds = self.opaque_bounds().ok_or(CutoutError::EmptyResult)?;
        Ok(self.crop_to(&bounds))
    }
}

fn update_bounds(bounds: &mut [u32; 4], x: u32, y: u32) {
    bounds[0] = bounds[0].min(x);
    bounds[1] = bounds[1].min(y);
    bounds[2] = bounds[2].max(x);
    bounds[3] = bounds[3].max(y);
}
