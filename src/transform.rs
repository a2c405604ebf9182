mod grayscale;
mod traits;

pub use grayscale::GrayscaleTransform;
pub use traits::TextureTransform;

pub mod prelude {
    pub use super::{GrayscaleTransform, TextureTransform};
}
