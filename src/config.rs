//! Pipeline configuration.

use serde::{Deserialize, Serialize};

use crate::stages::classifier::{Classifier, HsvTolerance, SimpleDistance};
use crate::stages::region_mask::MaskRegion;

/// Every tunable of the cutout pipeline
///
/// `Default` is the HSV keyer with a 150 px bottom-right mask and one
/// erosion pass. [`CutoutConfig::simple`] is the plain RGB keyer with
/// neither masking nor erosion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CutoutConfig {
    pub classifier: Classifier,
    /// Region forced to transparency after keying; `None` disables it.
    pub mask_region: Option<MaskRegion>,
    /// Rounds of one-pixel edge erosion; 0 disables it.
    pub erosion_passes: u32,
}

impl CutoutConfig {
    pub const DEFAULT_THRESHOLD: u16 = SimpleDistance::DEFAULT_THRESHOLD;
    pub const DEFAULT_HUE_TOLERANCE: u16 = HsvTolerance::DEFAULT_HUE;
    pub const DEFAULT_SATURATION_TOLERANCE: u16 = HsvTolerance::DEFAULT_SATURATION;
    pub const DEFAULT_VALUE_TOLERANCE: u16 = HsvTolerance::DEFAULT_VALUE;
    pub const DEFAULT_MASK_BOX_SIZE: u32 = MaskRegion::DEFAULT_BOX_SIZE;
    pub const DEFAULT_EROSION_PASSES: u32 = 1;

    /// RGB distance keying only.
    #[must_use]
    pub fn simple() -> Self {
        Self {
            classifier: Classifier::SimpleDistance(SimpleDistance::default()),
            mask_region: None,
            erosion_passes: 0,
        }
    }
}

impl Default for CutoutConfig {
    fn default() -> Self {
        Self {
            classifier: Classifier::default(),
            mask_region: Some(MaskRegion::default()),
            erosion_passes: Self::DEFAULT_EROSION_PASSES,
        }
    }
}
