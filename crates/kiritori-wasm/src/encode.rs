//! PNG encoding and export-naming WASM bindings.
//!
//! The session's `export_png` method covers the normal download path; the
//! free functions here let the host encode arbitrary pixel buffers (for
//! example a canvas snapshot) and name downloads consistently.

use wasm_bindgen::prelude::*;

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
/// PNG-encoded bytes as a `Uint8Array`, or an error if encoding fails.
///
/// # Errors
///
/// Returns an error if:
/// - Width or height is zero
/// - The pixel buffer length does not equal `width * height * 3`
///
/// # Example
///
/// ```typescript
/// const png = encode_png(pixels, 300, 300);
/// const blob = new Blob([png], { type: 'image/png' });
/// ```
#[wasm_bindgen]
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, JsValue> {
    kiritori_core::encode_png(pixels, width, height).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Build the download file name for an export at the given timestamp.
///
/// # Arguments
///
/// * `timestamp_ms` - Milliseconds since the Unix epoch, e.g. `Date.now()`
///
/// # Example
///
/// ```typescript
/// const name = export_file_name(Date.now());
/// // "kiritori-1700000000000.png"
/// ```
#[wasm_bindgen]
pub fn export_file_name(timestamp_ms: f64) -> String {
    kiritori_core::export_file_name(timestamp_ms.max(0.0) as u64)
}
