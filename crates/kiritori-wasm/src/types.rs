//! WASM-compatible wrapper types for bitmap data.
//!
//! This module provides JavaScript-friendly types that wrap the core
//! Kiritori types, handling the conversion between Rust and JavaScript
//! data representations.

use kiritori_core::Bitmap;
use wasm_bindgen::prelude::*;

/// A decoded bitmap wrapper for JavaScript.
///
/// Wraps the core `Bitmap` type and provides a JavaScript-friendly
/// interface for accessing dimensions and pixel data.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a
/// copy is made to JavaScript memory as a `Uint8Array`. The `free()`
/// method can be called to explicitly release WASM memory, but this is
/// optional as wasm-bindgen's finalizer will handle cleanup automatically.
#[wasm_bindgen]
pub struct JsBitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsBitmap {
    /// Create a new JsBitmap from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Bitmap width in pixels
    /// * `height` - Bitmap height in pixels
    /// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsBitmap {
        JsBitmap {
            width,
            height,
            pixels,
        }
    }

    /// Get the bitmap width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the bitmap height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 3)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsBitmap {
    /// Create a JsBitmap from a core Bitmap.
    pub(crate) fn from_bitmap(bitmap: Bitmap) -> Self {
        Self {
            width: bitmap.width,
            height: bitmap.height,
            pixels: bitmap.pixels,
        }
    }
}
