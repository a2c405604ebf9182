use std::path::PathBuf;

use itertools::Itertools;

use crate::dithering::{Algorithm, error_diffusion::Traversal};

pub const DEFAULT_OUT_DIR: &str = "./out";

/// Which samples of an image get dithered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Relative luminance, written as an 8 bit grayscale image.
    #[default]
    Luma,
    /// Red, green and blue independently, written as an 8 bit RGB image.
    Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessConfig {
    /// Created when missing.
    pub out_dir: PathBuf,
    /// Every algorithm produces its own output file, in this order.
    pub algorithms: Vec<Algorithm>,
    pub color_mode: ColorMode,
    pub traversal: Traversal,
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            algorithms: Algorithm::ALL.to_vec(),
            color_mode: ColorMode::default(),
            traversal: Traversal::default(),
        }
    }
}

impl ProcessConfig {
    pub fn with_out_dir(mut self, out_dir: impl Into<PathBuf>) -> Self {
        self.out_dir = out_dir.into();
        self
    }

    /// Duplicates are dropped; an empty selection means every algorithm.
    pub fn with_algorithms(mut self, algorithms: impl IntoIterator<Item = Algorithm>) -> Self {
        let algorithms = algorithms.into_iter().unique().collect_vec();
        self.algorithms = if algorithms.is_empty() {
            Algorithm::ALL.to_vec()
        } else {
            algorithms
        };
        self
    }

    pub fn with_color_mode(mut self, color_mode: ColorMode) -> Self {
        self.color_mode = color_mode;
        self
    }

    pub fn with_traversal(mut self, traversal: Traversal) -> Self {
        self.traversal = traversal;
        self
    }
}
