//! Running the pipeline over many files.
//!
//! Each file is an independent invocation. With the `rayon` feature the
//! files are spread across threads; a single image is never split.

use std::path::PathBuf;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::config::CutoutConfig;
use crate::error::Error;
use crate::io::process_file;

/// One input file and where its cutout goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Processes every job and returns their results in the same order.
///
/// A failing job does not stop the others.
pub fn process_batch(jobs: &[Job], config: &CutoutConfig) -> Vec<Result<(), Error>> {
    #[cfg(feature = "rayon")]
    let iter = jobs.par_iter();
    #[cfg(not(feature = "rayon"))]
    let iter = jobs.iter();

    iter.map(|job| process_file(&job.input, &job.output, config))
        .collect()
}
