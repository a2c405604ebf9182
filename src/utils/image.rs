use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};

use image::{DynamicImage, ImageFormat, ImageReader};

use crate::{
    dithering::Algorithm,
    error::{HalftoneError, Result},
};

pub fn read_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
    let image = ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(HalftoneError::decode)?;
    Ok(image)
}

/// Write `image`, the format follows the path's extension.
pub fn write_image<P: AsRef<Path>>(image: &DynamicImage, path: P) -> Result {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path).map_err(HalftoneError::encode)?;
    encodable(image, format)
        .save_with_format(path, format)
        .map_err(HalftoneError::encode)
}

/// GIF frames are always RGB(A), grayscale has to be expanded first.
fn encodable(image: &DynamicImage, format: ImageFormat) -> Cow<'_, DynamicImage> {
    match (format, image) {
        (ImageFormat::Gif, DynamicImage::ImageLuma8(_)) => {
            Cow::Owned(DynamicImage::ImageRgb8(image.to_rgb8()))
        }
        _ => Cow::Borrowed(image),
    }
}

/// `<out_dir>/<stem>.<algorithm>.<extension>` for an input image path.
pub fn output_path(input: &Path, out_dir: &Path, algorithm: Algorithm) -> Result<PathBuf> {
    let invalid = || HalftoneError::InvalidPath(input.to_path_buf());
    let stem = input.file_stem().ok_or_else(invalid)?;
    let extension = input.extension().ok_or_else(invalid)?;

    let mut name = stem.to_os_string();
    name.push(".");
    name.push(algorithm.name());
    name.push(".");
    name.push(extension);
    Ok(out_dir.join(name))
}
