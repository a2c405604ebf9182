use multiversion::multiversion;

use crate::{
    texture::{Shape, Shape2D, TextureMutSlice, TextureRef, TextureSlice},
    transform::TextureTransform,
};

/// 8 bit colour samples to relative luminance in `[0.0, 1.0]`.
///
/// Accepts 1 (luma), 2 (luma + alpha), 3 (rgb) or 4 (rgba) planes; alpha is
/// ignored.
pub enum GrayscaleTransform {
    Seq,
    Par,
}

impl GrayscaleTransform {
    /// Rows are only worth splitting across threads on larger images.
    pub fn auto(shape_hint: Shape2D) -> Self {
        let (width, height) = shape_hint;
        let count = width * height;

        if width < 450 || count < 202500 {
            return GrayscaleTransform::Seq;
        }
        GrayscaleTransform::Par
    }

    pub fn build(&self) -> impl TextureTransform<Input = u8, Output = f32> + use<> {
        match self {
            GrayscaleTransform::Seq => GrayscaleTransformImpl::Seq(GrayscaleSeq {}),
            GrayscaleTransform::Par => GrayscaleTransformImpl::Par(GrayscalePar {}),
        }
    }
}

enum GrayscaleTransformImpl {
    Seq(GrayscaleSeq),
    Par(GrayscalePar),
}

impl TextureTransform for GrayscaleTransformImpl {
    type Input = u8;
    type Output = f32;

    fn apply<'i, 'o>(
        &mut self,
        input: TextureSlice<'i, Self::Input>,
        output: TextureMutSlice<'o, Self::Output>,
    ) -> (
        TextureSlice<'i, Self::Input>,
        TextureMutSlice<'o, Self::Output>,
    ) {
        match self {
            GrayscaleTransformImpl::Seq(t) => t.apply(input, output),
            GrayscaleTransformImpl::Par(t) => t.apply(input, output),
        }
    }

    fn prepare(&mut self, in_shape: Shape, out_shape: Shape) {
        match self {
            GrayscaleTransformImpl::Seq(t) => t.prepare(in_shape, out_shape),
            GrayscaleTransformImpl::Par(t) => t.prepare(in_shape, out_shape),
        };
    }
}

struct GrayscaleSeq {}

impl TextureTransform for GrayscaleSeq {
    type Input = u8;
    type Output = f32;

    fn apply<'i, 'o>(
        &mut self,
        input: TextureSlice<'i, Self::Input>,
        mut output: TextureMutSlice<'o, Self::Output>,
    ) -> (
        TextureSlice<'i, Self::Input>,
        TextureMutSlice<'o, Self::Output>,
    ) {
        scalar_impl(input.as_ref(), output.as_mut(), input.planes() as usize);
        (input, output)
    }

    fn prepare(&mut self, _: Shape, _: Shape) {}
}

struct GrayscalePar {}

impl TextureTransform for GrayscalePar {
    type Input = u8;
    type Output = f32;

    fn apply<'i, 'o>(
        &mut self,
        input: TextureSlice<'i, Self::Input>,
        mut output: TextureMutSlice<'o, Self::Output>,
    ) -> (
        TextureSlice<'i, Self::Input>,
        TextureMutSlice<'o, Self::Output>,
    ) {
        scalar_par_impl(input.as_ref(), output.as_mut(), input.shape());
        (input, output)
    }

    fn prepare(&mut self, _: Shape, _: Shape) {}
}

/// Rec. 709 luma coefficients
const SRGB_LUMA_F32: [f32; 3] = [0.2126, 0.7152, 0.0722];

#[inline(always)]
fn luminance(pixel: &[u8]) -> f32 {
    if pixel.len() < 3 {
        return pixel[0] as f32 / 255.0;
    }
    (pixel[0] as f32 * SRGB_LUMA_F32[0]
        + pixel[1] as f32 * SRGB_LUMA_F32[1]
        + pixel[2] as f32 * SRGB_LUMA_F32[2])
        / 255.0
}

#[multiversion(targets("x86_64+avx512f", "x86_64+avx2", "x86_64+sse2"))]
fn scalar_impl(in_buf: &[u8], out_buf: &mut [f32], planes: usize) {
    debug_assert!((1..=4).contains(&planes));
    out_buf
        .iter_mut()
        .zip(in_buf.chunks_exact(planes))
        .for_each(|(out_pixel, in_pixel)| *out_pixel = luminance(in_pixel));
}

#[multiversion(targets("x86_64+avx512f", "x86_64+avx2", "x86_64+sse2"))]
fn scalar_par_impl(in_buf: &[u8], out_buf: &mut [f32], shape: Shape) {
    use rayon::prelude::*;

    let (width, _, planes) = shape;
    debug_assert!((1..=4).contains(&planes));
    if width == 0 {
        return;
    }
    out_buf
        .par_chunks_exact_mut(width)
        .zip(in_buf.par_chunks_exact(width * planes))
        .for_each(|(out_row, in_row)| {
            out_row
                .iter_mut()
                .zip(in_row.chunks_exact(planes))
                .for_each(|(out_pixel, in_pixel)| *out_pixel = luminance(in_pixel));
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::Texture;

    fn run(strategy: GrayscaleTransform, input: &Texture<u8>) -> Texture<f32> {
        let (width, height, _) = input.shape();
        let mut output = Texture::<f32>::new(width as u32, height as u32, 1);
        strategy
            .build()
            .once(input.as_texture_slice(), output.as_texture_mut_slice());
        output
    }

    #[test]
    fn test_rgba_luminance() {
        let input = Texture::from_vec(3, 1, 4, vec![
            255, 255, 255, 0, //
            0, 0, 0, 255, //
            255, 0, 0, 255,
        ]);
        let output = run(GrayscaleTransform::Seq, &input);
        let values = output.as_ref();

        assert!((values[0] - 1.0).abs() < 1e-6);
        assert_eq!(values[1], 0.0);
        assert!((values[2] - 0.2126).abs() < 1e-6);
    }

    #[test]
    fn test_single_plane_is_normalized() {
        let input = Texture::from_rows(&[[0u8, 51, 255]]);
        let output = run(GrayscaleTransform::Seq, &input);
        assert_eq!(output.as_ref(), &[0.0, 0.2, 1.0]);
    }

    #[test]
    fn test_seq_and_par_agree() {
        let size = 64u32;
        let data: Vec<u8> = (0..size * size * 3).map(|v| (v * 37 % 256) as u8).collect();
        let input = Texture::from_vec(size, size, 3, data);

        let seq = run(GrayscaleTransform::Seq, &input);
        let par = run(GrayscaleTransform::Par, &input);
        assert_eq!(seq, par);
    }

    #[test]
    fn test_auto_picks_par_for_large_images() {
        assert!(matches!(GrayscaleTransform::auto((100, 100)), GrayscaleTransform::Seq));
        assert!(matches!(GrayscaleTransform::auto((1000, 1000)), GrayscaleTransform::Par));
    }
}
