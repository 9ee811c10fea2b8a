//! Image decoding with EXIF orientation handling.
//!
//! Uploads arrive as raw bytes in whatever format the user picked; the
//! format is sniffed rather than trusted from the file name. Phone photos
//! routinely carry an EXIF orientation tag, so the decoded pixels are
//! rotated/flipped upright before the cropping geometry ever sees them.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};

use super::{Bitmap, BitmapError};

/// Decode an uploaded image from bytes, applying EXIF orientation
/// correction.
///
/// # Arguments
///
/// * `bytes` - Raw image file bytes (JPEG, PNG, ...)
///
/// # Returns
///
/// A `Bitmap` with RGB pixel data and correct orientation applied.
///
/// # Errors
///
/// Returns `BitmapError::InvalidFormat` if the format cannot be guessed,
/// or `BitmapError::CorruptedFile` if decoding fails.
pub fn decode_image(bytes: &[u8]) -> Result<Bitmap, BitmapError> {
    // Extract the EXIF orientation before decoding; absent or unreadable
    // EXIF data means no correction.
    let orientation = exif_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| BitmapError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(BitmapError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| BitmapError::CorruptedFile(e.to_string()))?;

    let upright = apply_orientation(img, orientation);
    Ok(Bitmap::from_rgb_image(upright.into_rgb8()))
}

/// Read the EXIF orientation tag (1-8), defaulting to 1 (normal) when the
/// file has no EXIF data.
fn exif_orientation(bytes: &[u8]) -> u32 {
    let mut cursor = Cursor::new(bytes);
    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .unwrap_or(1),
        Err(_) => 1,
    }
}

/// Apply an EXIF orientation value to a freshly decoded image. Unknown
/// values are treated as normal orientation.
fn apply_orientation(img: DynamicImage, orientation: u32) -> DynamicImage {
    match orientation {
        2 => img.fliph(),
        3 => img.rotate180(),
        4 => img.flipv(),
        5 => img.rotate90().fliph(),
        6 => img.rotate90(),
        7 => img.rotate270().fliph(),
        8 => img.rotate270(),
        _ => img,
    }
}
