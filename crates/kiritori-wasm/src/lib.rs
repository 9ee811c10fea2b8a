//! Kiritori WASM - WebAssembly bindings for Kiritori
//!
//! This crate exposes the kiritori-core cropping engine to
//! JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `session` - The editor session: pointer events, geometry, crop commit
//! - `types` - WASM-compatible wrapper types for bitmap data
//! - `decode` - Image decoding bindings
//! - `encode` - PNG encoding and export-naming bindings
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsEditorSession } from '@kiritori/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const session = new JsEditorSession();
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! session.load_image(bytes);
//!
//! canvas.width = session.viewport_width();
//! canvas.height = session.viewport_height();
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod session;
mod types;

// Re-export public types
pub use decode::decode_image;
pub use encode::{encode_png, export_file_name};
pub use session::JsEditorSession;
pub use types::JsBitmap;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Future: Set up panic hook for better error messages in browser console
    // when console_error_panic_hook feature is added
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
