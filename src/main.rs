//! chroma-cutout: key out a flat backdrop and crop to the subject.
//!
//! # Usage
//!
//! ```text
//! chroma-cutout [OPTIONS] <INPUT>...
//! ```
//!
//! Each input is written to `<stem>_cutout.png` beside it (or in
//! `--output-dir`) unless `--output` names the destination of a single input.

use std::path::PathBuf;
use std::process::ExitCode;

use chroma_cutout::{
    default_output_path, process_batch, Classifier, Corner, CutoutConfig, HsvTolerance, Job,
    MaskRegion, SimpleDistance,
};
use clap::{Parser, ValueEnum};
use log::{error, info, LevelFilter};

/// Remove a flat key-colored background and crop to what remains.
///
/// The key color is sampled from the top-left pixel of every input.
#[derive(Parser)]
#[command(name = "chroma-cutout", version)]
struct Cli {
    /// Input images (PNG, JPEG, BMP, WebP).
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output PNG path. Only valid with a single input.
    #[arg(short, long, conflicts_with = "output_dir")]
    output: Option<PathBuf>,

    /// Directory for `<stem>_cutout.png` outputs.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Keying method.
    #[arg(long, value_enum, default_value_t = Method::Hsv)]
    method: Method,

    /// Summed RGB distance below which a pixel is background (simple method).
    #[arg(long, default_value_t = CutoutConfig::DEFAULT_THRESHOLD)]
    threshold: u16,

    /// Hue tolerance, 0-255 scale (hsv method).
    #[arg(long, default_value_t = CutoutConfig::DEFAULT_HUE_TOLERANCE)]
    hue_tolerance: u16,

    /// Saturation tolerance, 0-255 scale (hsv method).
    #[arg(long, default_value_t = CutoutConfig::DEFAULT_SATURATION_TOLERANCE)]
    saturation_tolerance: u16,

    /// Value tolerance, 0-255 scale (hsv method).
    #[arg(long, default_value_t = CutoutConfig::DEFAULT_VALUE_TOLERANCE)]
    value_tolerance: u16,

    /// Edge length of the square always cleared in one corner.
    #[arg(long, default_value_t = CutoutConfig::DEFAULT_MASK_BOX_SIZE)]
    mask_size: u32,

    /// Corner the cleared square is anchored to.
    #[arg(long, value_enum, default_value_t = MaskCorner::BottomRight)]
    mask_corner: MaskCorner,

    /// Do not clear any corner region.
    #[arg(long)]
    no_mask: bool,

    /// Rounds of one-pixel fringe erosion (0 disables erosion).
    #[arg(long, default_value_t = CutoutConfig::DEFAULT_EROSION_PASSES)]
    erosion_passes: u32,

    /// Full pipeline config as a JSON string.
    ///
    /// When provided, all other pipeline parameter flags are ignored.
    /// The JSON must be a valid `CutoutConfig` serialization.
    #[arg(long)]
    config_json: Option<String>,

    /// Log each stage in detail.
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors.
    #[arg(short, long)]
    quiet: bool,
}

/// Keying method selection.
#[derive(Clone, Copy, ValueEnum)]
enum Method {
    /// Summed absolute RGB difference against a single threshold.
    Simple,
    /// Independent hue, saturation and value tolerances.
    Hsv,
}

/// Mask corner selection.
#[derive(Clone, Copy, ValueEnum)]
enum MaskCorner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl From<MaskCorner> for Corner {
    fn from(corner: MaskCorner) -> Self {
        match corner {
            MaskCorner::TopLeft => Self::TopLeft,
            MaskCorner::TopRight => Self::TopRight,
            MaskCorner::BottomLeft => Self::BottomLeft,
            MaskCorner::BottomRight => Self::BottomRight,
        }
    }
}

impl Cli {
    fn config(&self) -> Result<CutoutConfig, serde_json::Error> {
        if let Some(json) = &self.config_json {
            return serde_json::from_str(json);
        }

        let classifier = match self.method {
            Method::Simple => Classifier::SimpleDistance(SimpleDistance {
                threshold: self.threshold,
            }),
            Method::Hsv => Classifier::HsvTolerance(HsvTolerance {
                hue: self.hue_tolerance,
                saturation: self.saturation_tolerance,
                value: self.value_tolerance,
            }),
        };
        let mask_region = (!self.no_mask).then(|| MaskRegion {
            box_size: self.mask_size,
            corner: self.mask_corner.into(),
        });

        Ok(CutoutConfig {
            classifier,
            mask_region,
            erosion_passes: self.erosion_passes,
        })
    }

    fn jobs(&self) -> Vec<Job> {
        self.inputs
            .iter()
            .map(|input| Job {
                input: input.clone(),
                output: self.output.clone().unwrap_or_else(|| {
                    default_output_path(input, self.output_dir.as_deref())
                }),
            })
            .collect()
    }

    const fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else if self.quiet {
            LevelFilter::Warn
        } else {
            LevelFilter::Info
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    if cli.output.is_some() && cli.inputs.len() > 1 {
        error!("--output can only be used with a single input; use --output-dir instead");
        return ExitCode::FAILURE;
    }

    let config = match cli.config() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid --config-json: {e}");
            return ExitCode::FAILURE;
        }
    };

    let jobs = cli.jobs();
    let results = process_batch(&jobs, &config);

    let mut failed = 0usize;
    for (job, result) in jobs.iter().zip(&results) {
        match result {
            Ok(()) => info!("Wrote {}", job.output.display()),
            // Already reported as a warning; the input was valid.
            Err(e) if e.is_empty_result() => {}
            Err(e) => {
                error!("{e}");
                failed += 1;
            }
        }
    }

    if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
