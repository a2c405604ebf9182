//! One decoded image through the engine.
//!
//! The decoded image is converted once into a working [Source]; every
//! algorithm then dithers its own copy of that source, so neither the decoded
//! image nor the source are ever altered.

use image::{DynamicImage, GrayImage, RgbImage};

use crate::{
    config::ColorMode,
    dithering::{
        Algorithm,
        error_diffusion::{DiffusionStats, Traversal},
    },
    error::{HalftoneError, Result},
    texture::{Texture, TextureRef, TextureSlice},
    transform::{GrayscaleTransform, TextureTransform},
};

/// Samples ready to be dithered.
#[derive(Debug, Clone)]
pub enum Source {
    /// Relative luminance, one plane in `[0.0, 1.0]`.
    Luma(Texture<f32>),
    /// Three 8 bit planes.
    Rgb(Texture<u8>),
}

#[derive(Debug, Clone)]
pub struct Dithered {
    pub image: DynamicImage,
    pub stats: DiffusionStats,
}

impl Source {
    pub fn new(image: &DynamicImage, mode: ColorMode) -> Self {
        match mode {
            ColorMode::Luma => {
                let rgba = image.to_rgba8();
                let input = TextureSlice::from_image_buffer(&rgba);
                let mut luma = Texture::<f32>::new(input.width(), input.height(), 1);
                GrayscaleTransform::auto(input.shape_2d())
                    .build()
                    .once(input, luma.as_texture_mut_slice());
                Source::Luma(luma)
            }
            ColorMode::Rgb => Source::Rgb(image.to_rgb8().into()),
        }
    }

    /// Dither a copy of the source and turn it into an encodable image.
    pub fn dither(&self, algorithm: Algorithm, traversal: Traversal) -> Result<Dithered> {
        match self {
            Source::Luma(luma) => {
                let mut output = luma.clone();
                let stats = algorithm.dither_with(&mut output, traversal)?;
                let samples = output
                    .as_ref()
                    .iter()
                    .map(|v| if *v > 0.0 { u8::MAX } else { 0 })
                    .collect();
                let (width, height) = (output.width(), output.height());
                let image = GrayImage::from_raw(width, height, samples)
                    .ok_or(HalftoneError::InvalidBuffer { width, height })?;
                Ok(Dithered {
                    image: DynamicImage::ImageLuma8(image),
                    stats,
                })
            }
            Source::Rgb(rgb) => {
                let mut output = rgb.clone();
                let stats = algorithm.dither_with(&mut output, traversal)?;
                let (width, height) = (output.width(), output.height());
                let image = RgbImage::from_raw(width, height, output.into_vec())
                    .ok_or(HalftoneError::InvalidBuffer { width, height })?;
                Ok(Dithered {
                    image: DynamicImage::ImageRgb8(image),
                    stats,
                })
            }
        }
    }
}

/// Convenience for a single image and algorithm.
pub fn process(
    image: &DynamicImage,
    algorithm: Algorithm,
    mode: ColorMode,
    traversal: Traversal,
) -> Result<Dithered> {
    Source::new(image, mode).dither(algorithm, traversal)
}
