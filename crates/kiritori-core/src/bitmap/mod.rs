//! Bitmap pipeline for Kiritori.
//!
//! This module provides functionality for:
//! - The core RGB bitmap type shared across the crate
//! - Decoding uploaded image bytes (any format the `image` crate guesses),
//!   with EXIF orientation correction
//! - Extracting a source-space region and resampling it to the crop output
//!   size
//!
//! # Architecture
//!
//! Decoding and resampling are designed to be driven from the browser via
//! WASM bindings. All operations are synchronous and single-threaded within
//! WASM; the host treats them as the async boundary.

mod decode;
mod resample;
mod types;

pub use decode::decode_image;
pub use resample::{extract_region, resize_to};
pub use types::{Bitmap, BitmapError};
