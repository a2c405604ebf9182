//! Binary error diffusion dithering.
//!
//! The engine ([dithering]) quantizes every sample of a [texture::Texture] to
//! `0` or `MAX` in a single raster pass, pushing the quantization error onto
//! not yet visited neighbours with a Floyd-Steinberg or Atkinson kernel.
//! Around it sit image decoding/encoding ([utils::image]), the per-image
//! working copy ([pipeline]) and the batch surface used by the binary
//! ([batch]).
//!
//! ```
//! use halftoner::prelude::*;
//!
//! let mut texture = Texture::from_rows(&[[100u8, 100], [100, 100]]);
//! Algorithm::FloydSteinberg.dither(&mut texture).unwrap();
//! assert_eq!(texture.rows(), vec![vec![0, 255], vec![0, 0]]);
//! ```

use std::path::Path;

use crate::config::ProcessConfig;

pub mod batch;
pub mod config;
pub mod dithering;
pub mod error;
pub mod pipeline;
pub mod texture;
pub mod transform;
pub mod utils;

#[cfg(test)]
mod tests;

pub use error::{HalftoneError, Result};

pub mod prelude {
    pub use crate::config::{ColorMode, ProcessConfig};
    pub use crate::dithering::{
        Algorithm,
        error_diffusion::{DiffusionStats, Traversal},
        quantize::Sample,
    };
    pub use crate::texture::prelude::*;
    pub use crate::transform::prelude::*;
}

/// Dither every input with every algorithm in `config`, see [batch::run].
pub fn run<P: AsRef<Path> + Sync>(config: &ProcessConfig, inputs: &[P]) -> Result<batch::BatchReport> {
    batch::run(inputs, config)
}
