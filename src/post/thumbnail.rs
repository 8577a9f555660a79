//! Thumbnail generation for tutor post images.

use std::io::Cursor;

use image::imageops::FilterType;
use image::ImageFormat;
use thiserror::Error;

/// Target thumbnail width in pixels. Height follows the aspect ratio.
pub const THUMBNAIL_WIDTH: u32 = 600;

/// Thumbnail generation errors.
#[derive(Error, Debug)]
pub enum ThumbnailError {
    /// The uploaded bytes could not be decoded as an image.
    #[error("could not decode uploaded image: {0}")]
    Decode(#[from] image::ImageError),

    /// The resized image could not be re-encoded.
    #[error("could not encode thumbnail: {0}")]
    Encode(image::ImageError),
}

/// Resize an uploaded image to a 600px-wide PNG thumbnail.
///
/// Images already at or below the target width are re-encoded without
/// scaling up.
pub fn generate(image_bytes: &[u8]) -> Result<Vec<u8>, ThumbnailError> {
    let img = image::load_from_memory(image_bytes)?;

    let img = if img.width() > THUMBNAIL_WIDTH {
        let height = (u64::from(img.height()) * u64::from(THUMBNAIL_WIDTH)
            / u64::from(img.width())) as u32;
        img.resize(THUMBNAIL_WIDTH, height.max(1), FilterType::Triangle)
    } else {
        img
    };

    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)
        .map_err(ThumbnailError::Encode)?;
    Ok(out.into_inner())
}
