//! Loading rasters from disk and writing cutouts back as PNG.

use std::ffi::OsString;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{ImageError, ImageFormat, ImageReader, Rgba};
use log::{debug, info, warn};

use crate::config::CutoutConfig;
use crate::error::Error;
use crate::pipeline::cutout;
use crate::Image;

/// Decodes an image file of any supported format into RGBA8.
///
/// The format is guessed from the file contents, not the extension.
///
/// # Errors
///
/// * `Error::InputNotFound` - `path` is not an existing file
/// * `Error::Decode` - the file cannot be read or decoded
pub fn load_raster(path: &Path) -> Result<Image<Rgba<u8>>, Error> {
    if !path.is_file() {
        return Err(Error::InputNotFound(path.to_path_buf()));
    }

    let decode_error = |source: ImageError| Error::Decode {
        path: path.to_path_buf(),
        source,
    };
    let image = ImageReader::open(path)
        .map_err(|source| decode_error(source.into()))?
        .with_guessed_format()
        .map_err(|source| decode_error(source.into()))?
        .decode()
        .map_err(decode_error)?;

    Ok(image.into_rgba8())
}

/// Encodes `image` as PNG and writes it to `path` in one step.
///
/// The PNG is encoded in memory, written to a temporary file beside `path`
/// and then renamed over it, so `path` is either left untouched or holds the
/// complete image.
///
/// # Errors
///
/// * `Error::Encode` - PNG encoding fails
/// * `Error::Write` - the temporary file cannot be written or renamed
pub fn save_raster(image: &Image<Rgba<u8>>, path: &Path) -> Result<(), Error> {
    let mut encoded = Cursor::new(Vec::new());
    image
        .write_to(&mut encoded, ImageFormat::Png)
        .map_err(Error::Encode)?;

    let partial = partial_path(path);
    let write_error = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Err(source) = fs::write(&partial, encoded.get_ref()) {
        let _ = fs::remove_file(&partial);
        return Err(write_error(source));
    }
    if let Err(source) = fs::rename(&partial, path) {
        let _ = fs::remove_file(&partial);
        return Err(write_error(source));
    }

    Ok(())
}

/// Output path used when none is given: `<stem>_cutout.png`.
///
/// The file lands in `output_dir` when one is given, otherwise next to the
/// input.
#[must_use]
pub fn default_output_path(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let mut name = input
        .file_stem()
        .map_or_else(|| OsString::from("output"), OsString::from);
    name.push("_cutout.png");

    let directory = output_dir
        .or_else(|| input.parent())
        .unwrap_or_else(|| Path::new(""));
    directory.join(name)
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map_or_else(|| OsString::from("output"), OsString::from);
    name.push(".partial");
    path.with_file_name(name)
}

/// Loads `input`, cuts it out and saves the result to `output`.
///
/// Nothing is written unless every stage succeeds.
///
/// # Errors
///
/// Any [`Error`]. `Error::Cutout(CutoutError::EmptyResult)` means the input
/// was valid but keyed out completely; see [`Error::is_empty_result`].
pub fn process_file(input: &Path, output: &Path, config: &CutoutConfig) -> Result<(), Error> {
    info!("Opening {}", input.display());
    let image = load_raster(input)?;
    let (width, height) = image.dimensions();
    info!("Image dimensions: {width}x{height}");

    let result = match cutout(image, config) {
        Ok(result) => result,
        Err(error) => {
            let error = Error::from(error);
            if error.is_empty_result() {
                warn!("Entire image {} is transparent, skipping save", input.display());
            }
            return Err(error);
        }
    };
    debug!("New dimensions: {}x{}", result.width(), result.height());

    info!("Saving to {}", output.display());
    save_raster(&result, output)
}
