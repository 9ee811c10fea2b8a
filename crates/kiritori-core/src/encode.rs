//! PNG encoding for export.
//!
//! The downloadable crop result is always PNG, matching the fixed export
//! format of the tool. Encoding uses the `image` crate's PNG encoder.

use std::io::Cursor;

use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use thiserror::Error;

/// Errors that can occur during PNG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// PNG encoding failed
    #[error("PNG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode RGB pixel data to PNG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Returns
///
/// PNG-encoded bytes on success, or an error if encoding fails.
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    let mut buffer = Cursor::new(Vec::new());
    let encoder = PngEncoder::new(&mut buffer);

    encoder
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}
