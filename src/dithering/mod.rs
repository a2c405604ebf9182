use std::{fmt::Display, str::FromStr};

use crate::{
    dithering::{
        error_diffusion::{DiffusionStats, ErrorDiffusionTransform, Traversal},
        kernel::{ATKINSON, FLOYD_STEINBERG, Kernel},
        quantize::{BinaryQuantizer, Sample},
    },
    error::{HalftoneError, Result},
    texture::{Texture, TextureMut},
};

pub mod error_diffusion;
pub mod kernel;
pub mod quantize;

/// Supported error diffusion algorithms.
///
/// Each variant is bound to one [Kernel] and one quantizer. Adding an
/// algorithm means adding a variant, a kernel table and a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    FloydSteinberg,
    Atkinson,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::FloydSteinberg, Algorithm::Atkinson];

    pub fn kernel(&self) -> Kernel {
        match self {
            Algorithm::FloydSteinberg => FLOYD_STEINBERG,
            Algorithm::Atkinson => ATKINSON,
        }
    }

    /// Both algorithms threshold at the midpoint of the sample range.
    pub fn quantizer<T: Sample>(&self) -> BinaryQuantizer {
        match self {
            Algorithm::FloydSteinberg | Algorithm::Atkinson => BinaryQuantizer::midpoint::<T>(),
        }
    }

    /// Short name, used in output file names.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::FloydSteinberg => "floyd",
            Algorithm::Atkinson => "atkinson",
        }
    }

    pub fn transform<T: Sample>(&self, traversal: Traversal) -> ErrorDiffusionTransform<T> {
        ErrorDiffusionTransform::new(self.kernel(), self.quantizer::<T>(), traversal)
    }

    /// Dither `texture` in place, scanning in raster order.
    pub fn dither<T, Tex>(&self, texture: &mut Tex) -> Result<DiffusionStats>
    where
        T: Sample,
        Tex: TextureMut<Inner = T>,
    {
        self.dither_with(texture, Traversal::Raster)
    }

    /// Dither `texture` in place.
    ///
    /// Fails without touching the buffer when it has no pixels.
    pub fn dither_with<T, Tex>(&self, texture: &mut Tex, traversal: Traversal) -> Result<DiffusionStats>
    where
        T: Sample,
        Tex: TextureMut<Inner = T>,
    {
        if texture.is_empty() {
            return Err(HalftoneError::InvalidBuffer {
                width: texture.width(),
                height: texture.height(),
            });
        }

        let shape = texture.shape();
        let stats = self
            .transform::<T>(traversal)
            .diffuse_in_place(texture.as_mut(), shape);

        tracing::debug!(
            algorithm = self.name(),
            width = shape.0,
            height = shape.1,
            planes = shape.2,
            quantization_error = stats.quantization_error,
            dropped = stats.dropped,
            discarded = stats.discarded,
            "dithered buffer"
        );
        Ok(stats)
    }

    /// Dither a working copy, leaving `texture` as it was.
    pub fn dithered<T: Sample>(&self, texture: &Texture<T>, traversal: Traversal) -> Result<Texture<T>> {
        let mut copy = texture.clone();
        self.dither_with(&mut copy, traversal)?;
        Ok(copy)
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = HalftoneError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "floyd" | "floyd-steinberg" | "fs" => Ok(Algorithm::FloydSteinberg),
            "atkinson" => Ok(Algorithm::Atkinson),
            _ => Err(HalftoneError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::TextureRef;

    #[test]
    fn test_algorithm_from_str() {
        assert_eq!("floyd".parse::<Algorithm>().unwrap(), Algorithm::FloydSteinberg);
        assert_eq!(
            "Floyd_Steinberg".parse::<Algorithm>().unwrap(),
            Algorithm::FloydSteinberg
        );
        assert_eq!(" atkinson ".parse::<Algorithm>().unwrap(), Algorithm::Atkinson);
    }

    #[test]
    fn test_unknown_algorithm_is_rejected() {
        let err = "jarvis".parse::<Algorithm>().unwrap_err();
        assert!(matches!(err, HalftoneError::UnsupportedAlgorithm(name) if name == "jarvis"));
    }

    #[test]
    fn test_names_round_trip() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.to_string().parse::<Algorithm>().unwrap(), algorithm);
        }
    }

    #[test]
    fn test_algorithms_bind_their_kernel() {
        assert_eq!(Algorithm::FloydSteinberg.kernel(), FLOYD_STEINBERG);
        assert_eq!(Algorithm::Atkinson.kernel(), ATKINSON);
    }

    #[test]
    fn test_zero_width_is_invalid() {
        let mut texture = Texture::<u8>::new(0, 4, 1);
        let err = Algorithm::FloydSteinberg.dither(&mut texture).unwrap_err();
        assert!(matches!(
            err,
            HalftoneError::InvalidBuffer {
                width: 0,
                height: 4
            }
        ));
    }

    #[test]
    fn test_zero_height_is_invalid() {
        let texture = Texture::<u8>::new(4, 0, 1);
        let err = Algorithm::Atkinson
            .dithered(&texture, Traversal::Raster)
            .unwrap_err();
        assert!(matches!(err, HalftoneError::InvalidBuffer { .. }));
    }

    #[test]
    fn test_dithered_keeps_original() {
        let texture = Texture::from_rows(&[[100u8, 100], [100, 100]]);
        let result = Algorithm::FloydSteinberg
            .dithered(&texture, Traversal::Raster)
            .unwrap();
        assert_eq!(texture.rows(), vec![vec![100, 100], vec![100, 100]]);
        assert_eq!(result.shape(), texture.shape());
        assert_eq!(result.rows(), vec![vec![0, 255], vec![0, 0]]);
    }

    #[test]
    fn test_dither_through_mut_slice() {
        let mut texture = Texture::from_rows(&[[100u8; 4]]);
        let mut slice = texture.as_texture_mut_slice();
        Algorithm::Atkinson.dither(&mut slice).unwrap();
        assert_eq!(texture.rows(), vec![vec![0, 0, 0, 255]]);
    }
}
