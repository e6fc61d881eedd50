//! Chroma-key cutouts for painted templates.
//!
//! Removes a flat key-colored backdrop, clears a fixed artifact region,
//! erodes the anti-aliased fringe left around the subject and crops the
//! result to its bounding box.
//!
//! ```no_run
//! use chroma_cutout::{cutout, CutoutConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let image = image::open("template.jpg")?.into_rgba8();
//! let result = cutout(image, &CutoutConfig::default())?;
//! result.save("template_cutout.png")?;
//! # Ok(())
//! # }
//! ```

mod batch;
mod config;
mod error;
mod io;
mod pipeline;
mod stages;
mod utils;

#[cfg(test)]
mod test_utils;

use image::{ImageBuffer, Pixel};

pub use batch::{process_batch, Job};
pub use config::CutoutConfig;
pub use error::{CutoutError, Error};
pub use io::{default_output_path, load_raster, process_file, save_raster};
pub use pipeline::{cutout, remove_background};
pub use stages::classifier::{
    Classifier, ColorClassifier, ColorSample, HsvTolerance, KeyRemoval, RemoveKeyColor,
    SimpleDistance,
};
pub use stages::clip_transparent_border::{BoundingBox, ClipTransparentBorder};
pub use stages::convert_color::{rgb_to_hsv, rgba_to_hsv};
pub use stages::erode_edges::ErodeEdges;
pub use stages::key_sampler::SampleKey;
pub use stages::region_mask::{ClearRegion, Corner, MaskRegion};

pub type Image<P> = ImageBuffer<P, Vec<<P as Pixel>::Subpixel>>;
