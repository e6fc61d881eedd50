use std::io;
use std::path::PathBuf;

use image::ImageError;
use thiserror::Error;

/// Error type for the in-memory cutout pipeline
///
/// These errors never involve I/O, so they stay cheap to clone and compare.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CutoutError {
    /// The raster has a zero dimension
    ///
    /// The key color is read from pixel (0,0), so at least one pixel is
    /// required before any stage can run.
    #[error("Image dimensions must be non-zero, got {width}x{height}")]
    EmptyImage {
        /// Width of the rejected raster
        width: u32,
        /// Height of the rejected raster
        height: u32,
    },

    /// Every pixel ended up transparent, so there is nothing to crop to
    ///
    /// The pipeline ran to a valid but degenerate result. Callers should
    /// treat this as a warning and skip writing output.
    #[error("Entire image is transparent after keying, nothing to crop")]
    EmptyResult,
}

/// Error type for a single file-to-file invocation
///
/// Wraps [`CutoutError`] together with the decode, encode and write failures
/// that can happen around the pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// The input path does not resolve to a readable file
    #[error("Input file not found at {}", .0.display())]
    InputNotFound(PathBuf),

    /// The input bytes could not be decoded into a raster
    #[error("Failed to open image {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: ImageError,
    },

    /// The result could not be encoded as PNG
    #[error("Failed to encode PNG: {0}")]
    Encode(#[source] ImageError),

    /// The encoded PNG could not be written to its destination
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The pipeline itself rejected the raster or produced nothing
    #[error(transparent)]
    Cutout(#[from] CutoutError),
}

impl Error {
    /// Returns `true` when the invocation ended with a fully transparent image.
    ///
    /// This is the only recoverable outcome: no output was written, but the
    /// input was valid.
    #[must_use]
    pub const fn is_empty_result(&self) -> bool {
        matches!(self, Self::Cutout(CutoutError::EmptyResult))
    }
}
