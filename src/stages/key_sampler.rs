use image::Rgba;

use crate::error::CutoutError;
use crate::stages::classifier::{ColorClassifier, ColorSample};
use crate::utils::validate_non_empty_image;
use crate::Image;

/// Reads the key color from the reference pixel at (0,0)
pub trait SampleKey {
    /// Samples pixel (0,0) in the color space `classifier` works in.
    ///
    /// Only the one reference pixel is inspected. Call this before any stage
    /// writes to the image; the key is never re-sampled afterwards.
    ///
    /// # Errors
    ///
    /// * `CutoutError::EmptyImage` - the image has a zero dimension
    fn sample_key<C: ColorClassifier>(&self, classifier: &C) -> Result<ColorSample, CutoutError>;
}

impl SampleKey for Image<Rgba<u8>> {
    fn sample_key<C: ColorClassifier>(&self, classifier: &C) -> Result<ColorSample, CutoutError> {
        let (width, height) = self.dimensions();
        validate_non_empty_image(width, height)?;
        Ok(classifier.sample(*self.get_pixel(0, 0)))
    }
}
