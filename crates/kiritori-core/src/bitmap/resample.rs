//! Region extraction and resampling.
//!
//! Committing a crop samples a source-space rectangle out of the working
//! bitmap and scales it to the crop box's own dimensions, the same way the
//! browser's `drawImage(src, sx, sy, sw, sh, 0, 0, dw, dh)` does.

use crate::geometry::Rect;

use super::{Bitmap, BitmapError};

/// Extract a source-space rectangle from a bitmap, resampled to the target
/// output dimensions.
///
/// The rectangle may be fractional and may extend beyond the bitmap (the
/// image can be panned away from the crop box); it is clamped to the bitmap
/// bounds before sampling.
///
/// # Arguments
///
/// * `bitmap` - Source bitmap to sample
/// * `source` - Rectangle in source pixel units
/// * `out_width`, `out_height` - Output dimensions in pixels
///
/// # Errors
///
/// Returns `BitmapError::InvalidDimensions` if the output dimensions are
/// zero or the bitmap is empty.
pub fn extract_region(
    bitmap: &Bitmap,
    source: &Rect,
    out_width: u32,
    out_height: u32,
) -> Result<Bitmap, BitmapError> {
    if out_width == 0 || out_height == 0 {
        return Err(BitmapError::InvalidDimensions {
            width: out_width,
            height: out_height,
        });
    }
    if bitmap.is_empty() {
        return Err(BitmapError::InvalidDimensions {
            width: bitmap.width,
            height: bitmap.height,
        });
    }

    // Clamp the rectangle to integer pixel bounds, keeping at least one
    // pixel in each direction.
    let left = (source.x.round().max(0.0) as u32).min(bitmap.width - 1);
    let top = (source.y.round().max(0.0) as u32).min(bitmap.height - 1);
    let right = ((source.x + source.width).round().max(0.0) as u32)
        .clamp(left + 1, bitmap.width);
    let bottom = ((source.y + source.height).round().max(0.0) as u32)
        .clamp(top + 1, bitmap.height);

    let region_width = right - left;
    let region_height = bottom - top;

    // Byte offsets widen to usize before multiplying so large bitmaps
    // cannot overflow u32 arithmetic.
    let row_bytes = region_width as usize * 3;
    let mut region = vec![0u8; row_bytes * region_height as usize];

    // Copy pixel data row by row.
    for y in 0..region_height {
        let src_row = ((top + y) as usize * bitmap.width as usize + left as usize) * 3;
        let dst_row = y as usize * row_bytes;
        region[dst_row..dst_row + row_bytes]
            .copy_from_slice(&bitmap.pixels[src_row..src_row + row_bytes]);
    }

    resize_to(
        &Bitmap::new(region_width, region_height, region),
        out_width,
        out_height,
    )
}

/// Resize a bitmap to exact dimensions with bilinear filtering.
///
/// # Errors
///
/// Returns `BitmapError::InvalidDimensions` if either target dimension is
/// zero, or `BitmapError::CorruptedFile` if the pixel buffer does not match
/// the bitmap's stated dimensions.
pub fn resize_to(bitmap: &Bitmap, width: u32, height: u32) -> Result<Bitmap, BitmapError> {
    if width == 0 || height == 0 {
        return Err(BitmapError::InvalidDimensions { width, height });
    }

    // Fast path: if dimensions match, just clone.
    if bitmap.width == width && bitmap.height == height {
        return Ok(bitmap.clone());
    }

    let rgb = bitmap
        .to_rgb_image()
        .ok_or_else(|| BitmapError::CorruptedFile("Pixel buffer size mismatch".to_string()))?;

    let resized = image::imageops::resize(&rgb, width, height, image::imageops::FilterType::Triangle);

    Ok(Bitmap::from_rgb_image(resized))
}
