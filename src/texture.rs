/// (width, height, planes)
pub type Shape = (usize, usize, usize);
/// (width, height)
pub type Shape2D = (usize, usize);

/// Trait defining ops available on Textures with
/// lendable inner buffer.
///
/// Samples are interleaved: pixel `(x, y)` owns the `planes` consecutive
/// samples starting at `(y * width + x) * planes`.
pub trait TextureRef: AsRef<[Self::Inner]> {
    type Inner;

    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn planes(&self) -> u32;

    #[inline]
    fn shape(&self) -> Shape {
        (
            self.width() as usize,
            self.height() as usize,
            self.planes() as usize,
        )
    }

    #[inline]
    fn shape_2d(&self) -> Shape2D {
        (self.width() as usize, self.height() as usize)
    }

    /// A texture with no pixels in it.
    #[inline]
    fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

/// Trait defining ops available on mutable
/// Textures
pub trait TextureMut: TextureRef + AsMut<[Self::Inner]> {}

#[inline]
fn buffer_len(width: u32, height: u32, planes: u32) -> usize {
    width as usize * height as usize * planes as usize
}

/// Texture with owned buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture<T> {
    width: u32,
    height: u32,
    planes: u32,
    buffer: Vec<T>,
}

impl<T> AsRef<[T]> for Texture<T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        &self.buffer
    }
}

impl<T> AsMut<[T]> for Texture<T> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        &mut self.buffer
    }
}

impl<T> TextureRef for Texture<T> {
    type Inner = T;

    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn planes(&self) -> u32 {
        self.planes
    }
}

impl<T> TextureMut for Texture<T> {}

impl<T> Texture<T> {
    /// Take ownership of an interleaved buffer.
    ///
    /// # Panics
    /// When the buffer length doesn't match `width * height * planes`.
    pub fn from_vec(width: u32, height: u32, planes: u32, buffer: Vec<T>) -> Self {
        assert_eq!(
            buffer.len(),
            buffer_len(width, height, planes),
            "buffers don't match sizes"
        );
        Self {
            width,
            height,
            planes,
            buffer,
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        self.buffer
    }

    pub fn as_texture_slice(&self) -> TextureSlice<'_, T> {
        TextureSlice {
            width: self.width,
            height: self.height,
            planes: self.planes,
            buffer: &self.buffer,
        }
    }

    pub fn as_texture_mut_slice(&mut self) -> TextureMutSlice<'_, T> {
        TextureMutSlice {
            width: self.width,
            height: self.height,
            planes: self.planes,
            buffer: &mut self.buffer,
        }
    }
}

impl<T: Default + Copy> Texture<T> {
    pub fn new(width: u32, height: u32, planes: u32) -> Self {
        Self {
            width,
            height,
            planes,
            buffer: vec![T::default(); buffer_len(width, height, planes)],
        }
    }

    /// # Panics
    /// When a dimension doesn't fit in `u32`.
    pub fn with_shape(shape: Shape) -> Self {
        let (width, height, planes) = shape;
        let dimension = |value: usize| u32::try_from(value).expect("shape exceeds u32 dimensions");
        Self::new(dimension(width), dimension(height), dimension(planes))
    }
}

impl<T: Copy> Texture<T> {
    /// Build a texture from rows of single-plane samples.
    ///
    /// # Panics
    /// When rows have different lengths.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Self {
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        let mut buffer = Vec::with_capacity(width * rows.len());
        for row in rows {
            assert_eq!(row.as_ref().len(), width, "rows don't match sizes");
            buffer.extend_from_slice(row.as_ref());
        }
        Self::from_vec(width as u32, rows.len() as u32, 1, buffer)
    }

    /// Rows of the first plane, mostly useful for comparing small grids.
    pub fn rows(&self) -> Vec<Vec<T>> {
        let (width, _, planes) = self.shape();
        if width == 0 {
            return Vec::new();
        }
        self.buffer
            .chunks_exact(width * planes)
            .map(|row| row.iter().step_by(planes).copied().collect())
            .collect()
    }
}

impl<P> From<image::ImageBuffer<P, Vec<P::Subpixel>>> for Texture<P::Subpixel>
where
    P: image::Pixel,
{
    fn from(value: image::ImageBuffer<P, Vec<P::Subpixel>>) -> Self {
        let (width, height) = value.dimensions();
        Texture::from_vec(
            width,
            height,
            u32::from(P::CHANNEL_COUNT),
            value.into_raw(),
        )
    }
}

/// Texture with borrowed internal buffer
#[derive(Debug, Copy, Clone)]
pub struct TextureSlice<'a, T> {
    width: u32,
    height: u32,
    planes: u32,
    buffer: &'a [T],
}

impl<T> AsRef<[T]> for TextureSlice<'_, T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.buffer
    }
}

impl<T> TextureRef for TextureSlice<'_, T> {
    type Inner = T;

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn planes(&self) -> u32 {
        self.planes
    }
}

impl<'a, T> TextureSlice<'a, T> {
    pub fn new(width: u32, height: u32, planes: u32, buffer: &'a [T]) -> Self {
        assert_eq!(
            buffer.len(),
            buffer_len(width, height, planes),
            "buffers don't match sizes"
        );
        Self {
            width,
            height,
            planes,
            buffer,
        }
    }

    /// Borrow the raw samples of an `image` buffer without copying.
    pub fn from_image_buffer<P>(image: &'a image::ImageBuffer<P, Vec<T>>) -> Self
    where
        P: image::Pixel<Subpixel = T>,
    {
        let (width, height) = image.dimensions();
        Self::new(width, height, u32::from(P::CHANNEL_COUNT), image.as_raw())
    }
}

#[derive(Debug)]
pub struct TextureMutSlice<'a, T> {
    width: u32,
    height: u32,
    planes: u32,
    buffer: &'a mut [T],
}

impl<T> AsRef<[T]> for TextureMutSlice<'_, T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.buffer
    }
}

impl<T> AsMut<[T]> for TextureMutSlice<'_, T> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        self.buffer
    }
}

impl<T> TextureRef for TextureMutSlice<'_, T> {
    type Inner = T;

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn planes(&self) -> u32 {
        self.planes
    }
}

impl<T> TextureMut for TextureMutSlice<'_, T> {}

impl<'a, T> TextureMutSlice<'a, T> {
    pub fn new(width: u32, height: u32, planes: u32, buffer: &'a mut [T]) -> Self {
        assert_eq!(
            buffer.len(),
            buffer_len(width, height, planes),
            "buffers don't match sizes"
        );
        Self {
            width,
            height,
            planes,
            buffer,
        }
    }
}

pub mod prelude {
    pub use super::{Shape, Shape2D, Texture, TextureMut, TextureMutSlice, TextureRef, TextureSlice};
}
