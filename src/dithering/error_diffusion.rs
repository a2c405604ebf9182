//! The single-pass error diffusion engine.
//!
//! Pixels are visited once each, in traversal order. Every sample is
//! quantized against its accumulated value (original sample plus the error
//! diffused into it so far) and written back immediately; after that it never
//! changes again. The signed error left over is split among the kernel's
//! neighbours.
//!
//! Error aimed outside the buffer is dropped, never folded back into the
//! image. This is the reason for the characteristic artifacts along the
//! borders of error-diffused images and it is kept on purpose.

use std::marker::PhantomData;

use crate::{
    dithering::{
        kernel::Kernel,
        quantize::{BinaryQuantizer, Sample},
    },
    prelude::TextureTransform,
    texture::{Shape, TextureMutSlice, TextureRef, TextureSlice},
};

/// Order in which rows are scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Traversal {
    /// Every row left-to-right, top-to-bottom.
    #[default]
    Raster,
    /// Boustrophedon: odd rows are scanned right-to-left and the kernel is
    /// mirrored with them. Not what the classic algorithms describe, it
    /// trades border artifacts for a less directional texture.
    Serpentine,
}

/// Totals collected over one pass, summed over every channel.
///
/// `quantization_error == diffused + dropped + discarded`, and since output
/// only ever differs from input by what left the image,
/// `sum(input) - sum(output) == dropped + discarded`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DiffusionStats {
    /// Pixels visited.
    pub pixels: usize,
    /// Signed sum of `accumulated - quantized` over all samples.
    pub quantization_error: f64,
    /// Error added to in-bounds neighbours.
    pub diffused: f64,
    /// Error aimed at neighbours outside the buffer.
    pub dropped: f64,
    /// Error the kernel never assigns to any neighbour.
    pub discarded: f64,
}

/// Sliding window of accumulated error.
///
/// `rows[0]` is the row being quantized, `rows[dy]` the row `dy` below it.
/// Only `max_dy + 1` rows are ever alive.
#[derive(Debug, Default)]
pub struct ErrorRows {
    rows: Vec<Vec<f32>>,
    width: usize,
    planes: usize,
}

impl ErrorRows {
    pub fn new(width: usize, planes: usize, depth: usize) -> Self {
        Self {
            rows: (0..depth).map(|_| vec![0.0; width * planes]).collect(),
            width,
            planes,
        }
    }

    /// Make room for the given layout, zeroing any kept allocation.
    pub fn ensure(&mut self, width: usize, planes: usize, depth: usize) {
        if self.width == width && self.planes == planes && self.rows.len() == depth {
            self.rows.iter_mut().for_each(|row| row.fill(0.0));
        } else {
            *self = Self::new(width, planes, depth);
        }
    }

    /// Error accumulated so far for `plane` of pixel `x` on the current row.
    #[inline(always)]
    pub fn get(&self, x: usize, plane: usize) -> f32 {
        self.rows[0][x * self.planes + plane]
    }

    #[inline(always)]
    pub fn add(&mut self, x: usize, dy: usize, plane: usize, error: f32) {
        self.rows[dy][x * self.planes + plane] += error;
    }

    /// Move on to the next row, recycling the finished one as the deepest.
    pub fn advance(&mut self) {
        self.rows.rotate_left(1);
        if let Some(last) = self.rows.last_mut() {
            last.fill(0.0);
        }
    }
}

/// Error diffusion over `T` samples with a fixed kernel and quantizer.
///
/// As a [TextureTransform] it copies the input into the output and dithers
/// the output; [ErrorDiffusionTransform::diffuse_in_place] works on a buffer
/// directly. Empty buffers are left alone; rejecting them is up to the caller.
#[derive(Debug)]
pub struct ErrorDiffusionTransform<T> {
    kernel: Kernel,
    quantizer: BinaryQuantizer,
    traversal: Traversal,
    rows: ErrorRows,
    last_stats: DiffusionStats,
    _sample: PhantomData<T>,
}

impl<T: Sample> ErrorDiffusionTransform<T> {
    pub fn new(kernel: Kernel, quantizer: BinaryQuantizer, traversal: Traversal) -> Self {
        Self {
            kernel,
            quantizer,
            traversal,
            rows: ErrorRows::default(),
            last_stats: DiffusionStats::default(),
            _sample: PhantomData,
        }
    }

    /// Totals of the most recent pass.
    pub fn stats(&self) -> DiffusionStats {
        self.last_stats
    }

    /// Dither interleaved `samples` laid out as `shape`, in place.
    pub fn diffuse_in_place(&mut self, samples: &mut [T], shape: Shape) -> DiffusionStats {
        let (width, height, planes) = shape;
        debug_assert_eq!(samples.len(), width * height * planes);

        let mut stats = DiffusionStats::default();
        if width == 0 || height == 0 || planes == 0 {
            self.last_stats = stats;
            return stats;
        }

        let kernel = self.kernel;
        let quantizer = self.quantizer;
        let serpentine = self.traversal == Traversal::Serpentine;
        let divisor = f32::from(kernel.divisor);
        let rows = &mut self.rows;
        rows.ensure(width, planes, kernel.max_dy + 1);

        for y in 0..height {
            let reverse = serpentine && y % 2 == 1;
            for step in 0..width {
                let x = if reverse { width - 1 - step } else { step };
                let pixel = (y * width + x) * planes;

                for plane in 0..planes {
                    let value = samples[pixel + plane].as_() + rows.get(x, plane);
                    let (level, error) = quantizer.quantize_sample::<T>(value);
                    samples[pixel + plane] = level;

                    stats.quantization_error += f64::from(error);
                    if error == 0.0 {
                        continue;
                    }

                    let mut assigned = 0.0_f64;
                    for &(dx, dy, weight) in kernel.entries {
                        let share = error * f32::from(weight) / divisor;
                        assigned += f64::from(share);

                        let dx = if reverse { -dx } else { dx };
                        let nx = x as isize + dx as isize;
                        let ny = y + dy as usize;
                        if nx < 0 || nx >= width as isize || ny >= height {
                            stats.dropped += f64::from(share);
                            continue;
                        }

                        rows.add(nx as usize, dy as usize, plane, share);
                        stats.diffused += f64::from(share);
                    }
                    stats.discarded += f64::from(error) - assigned;
                }
            }
            rows.advance();
        }

        stats.pixels = width * height;
        self.last_stats = stats;
        stats
    }
}

impl<T: Sample> TextureTransform for ErrorDiffusionTransform<T> {
    type Input = T;
    type Output = T;

    fn apply<'i, 'o>(
        &mut self,
        input: TextureSlice<'i, Self::Input>,
        mut output: TextureMutSlice<'o, Self::Output>,
    ) -> (
        TextureSlice<'i, Self::Input>,
        TextureMutSlice<'o, Self::Output>,
    ) {
        debug_assert_eq!(input.shape(), output.shape(), "textures don't match shapes");
        let shape = output.shape();
        output.as_mut().copy_from_slice(input.as_ref());
        self.diffuse_in_place(output.as_mut(), shape);
        (input, output)
    }

    fn prepare(&mut self, _: Shape, out_shape: Shape) {
        let (width, _, planes) = out_shape;
        self.rows.ensure(width, planes, self.kernel.max_dy + 1);
    }
}
