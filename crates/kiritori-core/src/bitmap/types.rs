//! Core bitmap type and errors.

use thiserror::Error;

/// Error types for bitmap operations.
#[derive(Debug, Error)]
pub enum BitmapError {
    /// The bytes are not a recognized or supported image format.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// A zero dimension was requested or encountered.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },
}

/// A decoded bitmap with RGB pixel data.
#[derive(Debug, Clone)]
pub struct Bitmap {
    /// Bitmap width in pixels.
    pub width: u32,
    /// Bitmap height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    /// Length should be width * height * 3.
    pub pixels: Vec<u8>,
}

impl Bitmap {
    /// Create a new Bitmap with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * 3,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a Bitmap from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Convert to an image::RgbImage for further processing.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Get the total number of pixels. Widened so dimensions near the u32
    /// limit cannot overflow the product.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Check if this is an empty/invalid bitmap.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}
