use image::{Rgb, Rgba};
use imageproc::map::map_colors;
use serde::{Deserialize, Serialize};

use crate::error::CutoutError;
use crate::stages::convert_color::rgba_to_hsv;
use crate::stages::key_sampler::SampleKey;
use crate::utils::TRANSPARENT;
use crate::Image;

/// One pixel's color in the color space a classifier works in
///
/// Holds RGB for [`SimpleDistance`] and HSV for [`HsvTolerance`]. Alpha is
/// never part of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ColorSample(pub [u8; 3]);

impl ColorSample {
    /// Per-channel absolute difference to another sample.
    #[inline]
    #[must_use]
    pub fn abs_diff(self, other: Self) -> [u16; 3] {
        let [a0, a1, a2] = self.0;
        let [b0, b1, b2] = other.0;
        [
            u16::from(a0.abs_diff(b0)),
            u16::from(a1.abs_diff(b1)),
            u16::from(a2.abs_diff(b2)),
        ]
    }
}

/// Decides whether a pixel belongs to the keyed background
///
/// Implementors pick the color space through [`sample`](Self::sample) and the
/// match rule through [`matches`](Self::matches). Pixel traversal lives in
/// [`RemoveKeyColor`] and is shared by every implementor.
pub trait ColorClassifier {
    /// Reads a pixel into this classifier's color space.
    fn sample(&self, pixel: Rgba<u8>) -> ColorSample;

    /// Returns `true` if `sample` is close enough to `key` to be background.
    fn matches(&self, sample: ColorSample, key: ColorSample) -> bool;
}

/// Manhattan distance over raw RGB
///
/// A pixel is background iff `|R-Rk| + |G-Gk| + |B-Bk| < threshold`. Cheap,
/// but it cannot tell a hue shift from a brightness shift, so dark or
/// desaturated pixels whose channel sum lands near the key are removed too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimpleDistance {
    /// Exclusive upper bound on the summed channel difference.
    pub threshold: u16,
}

impl SimpleDistance {
    pub const DEFAULT_THRESHOLD: u16 = 100;
}

impl Default for SimpleDistance {
    fn default() -> Self {
        Self {
            threshold: Self::DEFAULT_THRESHOLD,
        }
    }
}

impl ColorClassifier for SimpleDistance {
    #[inline]
    fn sample(&self, pixel: Rgba<u8>) -> ColorSample {
        let Rgba([red, green, blue, _]) = pixel;
        ColorSample([red, green, blue])
    }

    #[inline]
    fn matches(&self, sample: ColorSample, key: ColorSample) -> bool {
        let distance: u16 = sample.abs_diff(key).iter().sum();
        distance < self.threshold
    }
}

/// Independent per-channel tolerances in HSV
///
/// A pixel is background iff hue, saturation and value are each strictly
/// within their tolerance of the key. Hue is kept narrow and saturation/value
/// wide because uneven lighting across a painted backdrop moves brightness
/// much more than it moves hue.
///
/// Hue differences are linear: there is no wraparound between hue 255 and
/// hue 0. Keys whose hue sits near that boundary (reds, magentas) will miss
/// background pixels that land on the other side of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HsvTolerance {
    pub hue: u16,
    pub saturation: u16,
    pub value: u16,
}

impl HsvTolerance {
    pub const DEFAULT_HUE: u16 = 20;
    pub const DEFAULT_SATURATION: u16 = 50;
    pub const DEFAULT_VALUE: u16 = 50;
}

impl Default for HsvTolerance {
    fn default() -> Self {
        Self {
            hue: Self::DEFAULT_HUE,
            saturation: Self::DEFAULT_SATURATION,
            value: Self::DEFAULT_VALUE,
        }
    }
}

impl ColorClassifier for HsvTolerance {
    #[inline]
    fn sample(&self, pixel: Rgba<u8>) -> ColorSample {
        ColorSample(rgba_to_hsv(pixel))
    }

    #[inline]
    fn matches(&self, sample: ColorSample, key: ColorSample) -> bool {
        let [hue, saturation, value] = sample.abs_diff(key);
        hue < self.hue && saturation < self.saturation && value < self.value
    }
}

/// The classifier strategies a pipeline can be configured with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum Classifier {
    SimpleDistance(SimpleDistance),
    HsvTolerance(HsvTolerance),
}

impl Default for Classifier {
    fn default() -> Self {
        Self::HsvTolerance(HsvTolerance::default())
    }
}

impl ColorClassifier for Classifier {
    #[inline]
    fn sample(&self, pixel: Rgba<u8>) -> ColorSample {
        match self {
            Self::SimpleDistance(inner) => inner.sample(pixel),
            Self::HsvTolerance(inner) => inner.sample(pixel),
        }
    }

    #[inline]
    fn matches(&self, sample: ColorSample, key: ColorSample) -> bool {
        match self {
            Self::SimpleDistance(inner) => inner.matches(sample, key),
            Self::HsvTolerance(inner) => inner.matches(sample, key),
        }
    }
}

/// Outcome of a key removal pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyRemoval {
    /// The key sampled from (0,0) before anything was modified.
    pub key: ColorSample,
    /// Number of pixels classified as background.
    pub cleared: usize,
}

/// Removes every pixel that matches the key color sampled at (0,0)
pub trait RemoveKeyColor {
    /// Samples the key, classifies every pixel against it, and clears the
    /// background pixels to fully transparent in place.
    ///
    /// Classification reads a sample plane built before the first write, so
    /// the result does not depend on traversal order.
    ///
    /// # Errors
    ///
    /// * `CutoutError::EmptyImage` - the image has a zero dimension
    fn remove_key_color<C: ColorClassifier>(
        &mut self,
        classifier: &C,
    ) -> Result<KeyRemoval, CutoutError>;
}

impl RemoveKeyColor for Image<Rgba<u8>> {
    fn remove_key_color<C: ColorClassifier>(
        &mut self,
        classifier: &C,
    ) -> Result<KeyRemoval, CutoutError> {
        let key = self.sample_key(classifier)?;
        let samples: Image<Rgb<u8>> = map_colors(&*self, |pixel| Rgb(classifier.sample(pixel).0));

        let mut cleared = 0;
        for (pixel, sample) in self.pixels_mut().zip(samples.pixels()) {
            if classifier.matches(ColorSample(sample.0), key) {
                *pixel = TRANSPARENT;
                cleared += 1;
            }
        }

        Ok(KeyRemoval { key, cleared })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use imageproc::rgba_image;

    #[test]
    fn test_simple_distance_is_strictly_less_than() {
        let classifier = SimpleDistance { threshold: 100 };
        let key = ColorSample([255, 128, 0]);

        assert!(classifier.matches(key, key));
        assert!(classifier.matches(ColorSample([255, 128, 99]), key));
        assert!(!classifier.matches(ColorSample([255, 128, 100]), key));
        assert!(!classifier.matches(ColorSample([205, 78, 0]), key));
    }

    #[test]
    fn test_simple_distance_accepts_dark_pixel_near_key_sum() {
        let classifier = SimpleDistance { threshold: 100 };
        let key = classifier.sample(Rgba([40, 40, 40, 255]));

        // Different hue entirely, same neighbourhood of channel sum.
        assert!(classifier.matches(classifier.sample(Rgba([0, 40, 70, 255])), key));
    }

    #[test]
    fn test_hsv_tolerance_requires_every_channel() {
        let classifier = HsvTolerance::default();
        let key = ColorSample([21, 255, 255]);

        assert!(classifier.matches(ColorSample([21, 255, 255]), key));
        assert!(classifier.matches(ColorSample([40, 206, 206]), key));
        // Hue alone out of range.
        assert!(!classifier.matches(ColorSample([41, 255, 255]), key));
        // Saturation alone out of range.
        assert!(!classifier.matches(ColorSample([21, 205, 255]), key));
        // Value alone out of range.
        assert!(!classifier.matches(ColorSample([21, 255, 205]), key));
    }

    #[test]
    fn test_hsv_tolerance_hue_does_not_wrap() {
        let classifier = HsvTolerance::default();
        let key = ColorSample([2, 255, 255]);

        // 2 and 252 are 6 apart on the circle but 250 apart linearly.
        assert!(!classifier.matches(ColorSample([252, 255, 255]), key));
    }

    #[test]
    fn test_zero_tolerance_matches_nothing() {
        let classifier = HsvTolerance {
            hue: 0,
            saturation: 50,
            value: 50,
        };
        let key = ColorSample([10, 10, 10]);
        assert!(!classifier.matches(key, key));
        assert!(!SimpleDistance { threshold: 0 }.matches(key, key));
    }

    #[test]
    fn test_classifier_enum_dispatches() {
        let pixel = Rgba([255, 128, 0, 255]);
        let simple = Classifier::SimpleDistance(SimpleDistance::default());
        let hsv = Classifier::HsvTolerance(HsvTolerance::default());

        assert_eq!(simple.sample(pixel), ColorSample([255, 128, 0]));
        assert_eq!(hsv.sample(pixel), ColorSample([21, 255, 255]));
        assert_eq!(Classifier::default(), hsv);
    }

    #[test]
    fn test_remove_key_color_clears_matching_pixels() {
        let mut image = rgba_image!(
            [255, 128, 0, 255], [250, 130, 5, 255];
            [0, 0, 255, 255], [255, 128, 0, 255]);

        let removal = image
            .remove_key_color(&SimpleDistance::default())
            .expect("non-empty image");

        assert_eq!(removal.key, ColorSample([255, 128, 0]));
        assert_eq!(removal.cleared, 3);
        assert_eq!(*image.get_pixel(0, 0), TRANSPARENT);
        assert_eq!(*image.get_pixel(1, 0), TRANSPARENT);
        assert_eq!(*image.get_pixel(0, 1), Rgba([0, 0, 255, 255]));
        assert_eq!(*image.get_pixel(1, 1), TRANSPARENT);
    }

    #[test]
    fn test_remove_key_color_preserves_foreground_alpha() {
        let mut image = rgba_image!([255, 128, 0, 255], [0, 0, 255, 77]);

        image
            .remove_key_color(&HsvTolerance::default())
            .expect("non-empty image");

        assert_eq!(*image.get_pixel(1, 0), Rgba([0, 0, 255, 77]));
    }

    #[test]
    fn test_remove_key_color_rejects_empty_image() {
        let mut image: Image<Rgba<u8>> = Image::new(0, 4);
        assert_eq!(
            image.remove_key_color(&Classifier::default()),
            Err(CutoutError::EmptyImage {
                width: 0,
                height: 4
            })
        );
    }

    #[test]
    fn test_classifier_json_is_tagged_by_method() {
        let json = r#"{"method":"simple_distance","threshold":42}"#;
        let classifier: Classifier = serde_json::from_str(json).expect("valid json");
        assert_eq!(
            classifier,
            Classifier::SimpleDistance(SimpleDistance { threshold: 42 })
        );

        let json = r#"{"method":"hsv_tolerance","hue":5}"#;
        let classifier: Classifier = serde_json::from_str(json).expect("valid json");
        assert_eq!(
            classifier,
            Classifier::HsvTolerance(HsvTolerance {
                hue: 5,
                ..HsvTolerance::default()
            })
        );
    }
}
