//! Export settings: output sizing and download naming.
//!
//! The crop box's own dimensions are the default output size. The UI also
//! offers explicit width/height fields; when *both* are filled in they take
//! precedence at export time (a single field only shapes the crop box, not
//! the output).

use serde::{Deserialize, Serialize};

use crate::geometry::Size;

/// Explicit output-size overrides from the UI's numeric fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExportSettings {
    pub width_override: Option<u32>,
    pub height_override: Option<u32>,
}

impl ExportSettings {
    pub fn new(width_override: Option<u32>, height_override: Option<u32>) -> Self {
        Self {
            width_override,
            height_override,
        }
    }

    /// Resolve the output dimensions: both overrides present and non-zero
    /// win over the crop-box size; anything else falls back to the crop box.
    pub fn resolve_output_size(&self, crop_size: Size) -> (u32, u32) {
        match (self.width_override, self.height_override) {
            (Some(width), Some(height)) if width > 0 && height > 0 => (width, height),
            _ => (
                crop_size.width.round().max(1.0) as u32,
                crop_size.height.round().max(1.0) as u32,
            ),
        }
    }
}

/// Download file name for an export: a timestamp-based identifier with the
/// fixed PNG extension.
pub fn export_file_name(timestamp_ms: u64) -> String {
    format!("kiritori-{timestamp_ms}.png")
}
