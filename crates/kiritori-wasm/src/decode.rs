//! Image decoding WASM bindings.
//!
//! This module exposes the kiritori-core image decoding function to
//! JavaScript. Decoding is format-sniffing (JPEG, PNG) and applies EXIF
//! orientation correction automatically.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image } from '@kiritori/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const bitmap = decode_image(bytes);
//! console.log(`Decoded ${bitmap.width}x${bitmap.height} image`);
//! ```

use crate::types::JsBitmap;
use kiritori_core::bitmap;
use wasm_bindgen::prelude::*;

/// Decode an image from bytes.
///
/// The format is sniffed from the byte content, so any format the engine
/// supports (JPEG, PNG) can be passed in. EXIF orientation is applied, so
/// the resulting pixels are upright.
///
/// # Arguments
///
/// * `bytes` - The raw image file bytes as a `Uint8Array`
///
/// # Returns
///
/// A `JsBitmap` containing the decoded RGB pixel data, or an error if
/// decoding fails.
///
/// # Errors
///
/// Returns an error if:
/// - The bytes are not in a recognized image format
/// - The file is corrupted or truncated
///
/// # Example
///
/// ```typescript
/// const bytes = new Uint8Array(await file.arrayBuffer());
/// const bitmap = decode_image(bytes);
/// ```
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsBitmap, JsValue> {
    bitmap::decode_image(bytes)
        .map(JsBitmap::from_bitmap)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
