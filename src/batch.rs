//! Many images, every selected algorithm.
//!
//! Each (image, algorithm) pair is a unit of work whose failure is recorded
//! and logged without stopping any other unit. Images run in parallel; the
//! passes themselves stay sequential.

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use itertools::Itertools;
use rayon::prelude::*;

use crate::{
    config::ProcessConfig,
    dithering::{Algorithm, error_diffusion::DiffusionStats},
    error::{HalftoneError, Result},
    pipeline::Source,
    utils::image::{output_path, read_image, write_image},
};

#[derive(Debug)]
pub enum Outcome {
    Written {
        algorithm: Algorithm,
        path: PathBuf,
        stats: DiffusionStats,
    },
    Failed {
        /// `None` when the image itself couldn't be read.
        algorithm: Option<Algorithm>,
        error: HalftoneError,
    },
}

#[derive(Debug)]
pub struct ImageReport {
    pub input: PathBuf,
    pub outcomes: Vec<Outcome>,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    /// In input order.
    pub images: Vec<ImageReport>,
}

impl BatchReport {
    pub fn written(&self) -> impl Iterator<Item = &Path> {
        self.images
            .iter()
            .flat_map(|image| &image.outcomes)
            .filter_map(|outcome| match outcome {
                Outcome::Written { path, .. } => Some(path.as_path()),
                Outcome::Failed { .. } => None,
            })
    }

    pub fn failures(&self) -> impl Iterator<Item = (&Path, Option<Algorithm>, &HalftoneError)> {
        self.images.iter().flat_map(|image| {
            image.outcomes.iter().filter_map(|outcome| match outcome {
                Outcome::Failed { algorithm, error } => {
                    Some((image.input.as_path(), *algorithm, error))
                }
                Outcome::Written { .. } => None,
            })
        })
    }

    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }

    /// One line per failed unit.
    pub fn failure_summary(&self) -> String {
        self.failures()
            .map(|(input, algorithm, error)| match algorithm {
                Some(algorithm) => format!("{} ({algorithm}): {error}", input.display()),
                None => format!("{}: {error}", input.display()),
            })
            .join("\n")
    }
}

/// Output path of every (image, algorithm) unit.
type Plan = Vec<(Algorithm, Result<PathBuf>)>;

/// Dither every input with every configured algorithm.
///
/// Only fails when the output directory can't be created, since then no unit
/// could succeed.
pub fn run<P: AsRef<Path> + Sync>(inputs: &[P], config: &ProcessConfig) -> Result<BatchReport> {
    fs::create_dir_all(&config.out_dir)?;

    let images = inputs
        .par_iter()
        .zip(plan_outputs(inputs, config))
        .map(|(input, plan)| process_image(input.as_ref(), plan, config))
        .collect();

    Ok(BatchReport { images })
}

/// Outputs are claimed in input order; a unit whose path is already taken
/// fails with [HalftoneError::OutputCollision].
fn plan_outputs<P: AsRef<Path>>(inputs: &[P], config: &ProcessConfig) -> Vec<Plan> {
    let mut claimed = HashSet::new();
    inputs
        .iter()
        .map(|input| {
            config
                .algorithms
                .iter()
                .map(|&algorithm| {
                    let path = output_path(input.as_ref(), &config.out_dir, algorithm)
                        .and_then(|path| {
                            if claimed.insert(path.clone()) {
                                Ok(path)
                            } else {
                                Err(HalftoneError::OutputCollision(path))
                            }
                        });
                    (algorithm, path)
                })
                .collect()
        })
        .collect()
}

fn process_image(input: &Path, plan: Plan, config: &ProcessConfig) -> ImageReport {
    let report = |outcomes| ImageReport {
        input: input.to_path_buf(),
        outcomes,
    };

    // nothing to write, don't bother decoding
    if plan.iter().all(|(_, path)| path.is_err()) {
        return report(
            plan.into_iter()
                .filter_map(|(algorithm, path)| path.err().map(|error| failed(input, algorithm, error)))
                .collect(),
        );
    }

    let image = match read_image(input) {
        Ok(image) => image,
        Err(error) => {
            tracing::warn!(input = %input.display(), %error, "failed to read image");
            return report(vec![Outcome::Failed {
                algorithm: None,
                error,
            }]);
        }
    };
    tracing::debug!(
        input = %input.display(),
        width = image.width(),
        height = image.height(),
        "decoded image"
    );

    let source = Source::new(&image, config.color_mode);
    let outcomes = plan
        .into_iter()
        .map(|(algorithm, path)| {
            match path.and_then(|path| dither_to_file(&source, algorithm, path, config)) {
                Ok((path, stats)) => {
                    tracing::info!(output = %path.display(), %algorithm, "wrote image");
                    Outcome::Written {
                        algorithm,
                        path,
                        stats,
                    }
                }
                Err(error) => failed(input, algorithm, error),
            }
        })
        .collect();

    report(outcomes)
}

fn failed(input: &Path, algorithm: Algorithm, error: HalftoneError) -> Outcome {
    tracing::warn!(input = %input.display(), %algorithm, %error, "failed to dither image");
    Outcome::Failed {
        algorithm: Some(algorithm),
        error,
    }
}

fn dither_to_file(
    source: &Source,
    algorithm: Algorithm,
    path: PathBuf,
    config: &ProcessConfig,
) -> Result<(PathBuf, DiffusionStats)> {
    let dithered = source.dither(algorithm, config.traversal)?;
    write_image(&dithered.image, &path)?;
    Ok((path, dithered.stats))
}
