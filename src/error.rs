use std::path::PathBuf;

use thiserror::Error;

/// The main error type for the halftoner crate
#[derive(Debug, Error)]
pub enum HalftoneError {
    /// The buffer handed to the engine has no pixels
    #[error("invalid buffer: {width}x{height} has no pixels")]
    InvalidBuffer { width: u32, height: u32 },

    /// An algorithm name that no variant answers to
    #[error("unsupported algorithm: {0:?}")]
    UnsupportedAlgorithm(String),

    /// Error occurred while reading or decoding an image
    #[error("image decode error: {0}")]
    Decode(#[source] image::ImageError),

    /// Error occurred while writing or encoding an image
    #[error("image encode error: {0}")]
    Encode(#[source] image::ImageError),

    /// Error occurred during I/O operations (file read/write)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A path an output name can't be derived from
    #[error("invalid path: {}", .0.display())]
    InvalidPath(PathBuf),

    /// An earlier unit of the same batch already writes this output
    #[error("output {} is already written by another input", .0.display())]
    OutputCollision(PathBuf),
}

impl HalftoneError {
    /// Classify an error raised while reading an image.
    pub fn decode(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => HalftoneError::Io(e),
            err => HalftoneError::Decode(err),
        }
    }

    /// Classify an error raised while writing an image.
    pub fn encode(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => HalftoneError::Io(e),
            err => HalftoneError::Encode(err),
        }
    }
}

// Convenience type alias for Results using HalftoneError
pub type Result<T = ()> = std::result::Result<T, HalftoneError>;

#[cfg(test)]
mod tests {
    use image::{
        ImageError,
        error::{ImageFormatHint, UnsupportedError},
    };

    use super::*;

    fn unsupported() -> ImageError {
        ImageError::Unsupported(UnsupportedError::from(ImageFormatHint::Unknown))
    }

    #[test]
    fn test_side_decides_image_error_variant() {
        assert!(matches!(
            HalftoneError::decode(unsupported()),
            HalftoneError::Decode(_)
        ));
        assert!(matches!(
            HalftoneError::encode(unsupported()),
            HalftoneError::Encode(_)
        ));
    }

    #[test]
    fn test_io_errors_stay_io() {
        let io = || ImageError::IoError(std::io::Error::other("disk full"));
        assert!(matches!(HalftoneError::decode(io()), HalftoneError::Io(_)));
        assert!(matches!(HalftoneError::encode(io()), HalftoneError::Io(_)));
    }
}
