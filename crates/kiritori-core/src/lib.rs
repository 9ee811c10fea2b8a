//! Kiritori Core - Image cropping engine
//!
//! This crate provides the core functionality for Kiritori, a client-side
//! image cropping tool: viewport geometry and coordinate mapping, the
//! pointer-driven interaction state machine, crop-rectangle computation,
//! pixel extraction, and image decode/encode.

pub mod bitmap;
pub mod crop;
pub mod encode;
pub mod export;
pub mod geometry;
pub mod session;

pub use bitmap::{decode_image, Bitmap, BitmapError};
pub use crop::{compute_crop_plan, compute_source_rect, CropPlan};
pub use encode::{encode_png, EncodeError};
pub use export::{export_file_name, ExportSettings};
pub use geometry::{to_viewport_space, BoundingRect, Point, Rect, Size, Viewport};
pub use session::{
    CropRect, EditorSession, HitTarget, ImageTransform, InputEvent, InteractionMode,
    ResizeHandle, SessionError,
};

/// Minimum zoom slider percentage.
const MIN_ZOOM_PERCENT: u32 = 10;
/// Maximum zoom slider percentage.
const MAX_ZOOM_PERCENT: u32 = 300;
/// Default zoom slider percentage (no scaling).
const DEFAULT_ZOOM_PERCENT: u32 = 100;

/// Aspect-ratio constraint for the crop rectangle.
///
/// `Free` places no constraint on the rectangle; the fixed variants force
/// `width / height` to the named ratio during resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum AspectRatio {
    /// No constraint.
    #[default]
    Free,
    /// 1:1
    Square,
    /// 4:3
    FourThree,
    /// 16:9
    SixteenNine,
    /// 3:4
    ThreeFour,
    /// 9:16
    NineSixteen,
}

impl AspectRatio {
    /// The width/height multiplier for locked ratios, `None` when free.
    pub fn ratio(self) -> Option<f64> {
        match self {
            AspectRatio::Free => None,
            AspectRatio::Square => Some(1.0),
            AspectRatio::FourThree => Some(4.0 / 3.0),
            AspectRatio::SixteenNine => Some(16.0 / 9.0),
            AspectRatio::ThreeFour => Some(3.0 / 4.0),
            AspectRatio::NineSixteen => Some(9.0 / 16.0),
        }
    }

    /// Whether the ratio is fixed.
    pub fn is_locked(self) -> bool {
        self != AspectRatio::Free
    }

    /// Parse a UI radio-button value ("free", "1:1", "4:3", "16:9", "3:4",
    /// "9:16"). Unknown labels fall back to `Free`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "1:1" => AspectRatio::Square,
            "4:3" => AspectRatio::FourThree,
            "16:9" => AspectRatio::SixteenNine,
            "3:4" => AspectRatio::ThreeFour,
            "9:16" => AspectRatio::NineSixteen,
            _ => AspectRatio::Free,
        }
    }

    /// The UI label for this ratio.
    pub fn label(self) -> &'static str {
        match self {
            AspectRatio::Free => "free",
            AspectRatio::Square => "1:1",
            AspectRatio::FourThree => "4:3",
            AspectRatio::SixteenNine => "16:9",
            AspectRatio::ThreeFour => "3:4",
            AspectRatio::NineSixteen => "9:16",
        }
    }
}

/// Zoom slider percentage, guaranteed to be within the valid range (10-300%).
///
/// This type ensures that scale values are always positive and bounded,
/// eliminating the need for manual clamping at usage sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ZoomScale(u32);

impl ZoomScale {
    /// Creates a new zoom scale, clamping the percentage to the valid range.
    pub fn new(percent: u32) -> Self {
        Self(percent.clamp(MIN_ZOOM_PERCENT, MAX_ZOOM_PERCENT))
    }

    /// Returns the raw percentage value.
    pub fn percent(self) -> u32 {
        self.0
    }

    /// Returns the scale as a multiplier (e.g., 100% -> 1.0).
    pub fn as_factor(self) -> f64 {
        f64::from(self.0) / 100.0
    }

    /// Whether the scale represents 100% (no zoom).
    pub fn is_original(self) -> bool {
        self.0 == DEFAULT_ZOOM_PERCENT
    }
}

impl Default for ZoomScale {
    fn default() -> Self {
        Self(DEFAULT_ZOOM_PERCENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratio_values() {
        assert_eq!(AspectRatio::Free.ratio(), None);
        assert_eq!(AspectRatio::Square.ratio(), Some(1.0));
        assert_eq!(AspectRatio::SixteenNine.ratio(), Some(16.0 / 9.0));
        assert_eq!(AspectRatio::NineSixteen.ratio(), Some(9.0 / 16.0));
    }

    #[test]
    fn test_aspect_ratio_locked() {
        assert!(!AspectRatio::Free.is_locked());
        assert!(AspectRatio::Square.is_locked());
        assert!(AspectRatio::ThreeFour.is_locked());
    }

    #[test]
    fn test_aspect_ratio_label_round_trip() {
        for aspect in [
            AspectRatio::Free,
            AspectRatio::Square,
            AspectRatio::FourThree,
            AspectRatio::SixteenNine,
            AspectRatio::ThreeFour,
            AspectRatio::NineSixteen,
        ] {
            assert_eq!(AspectRatio::from_label(aspect.label()), aspect);
        }
    }

    #[test]
    fn test_aspect_ratio_unknown_label_is_free() {
        assert_eq!(AspectRatio::from_label("2:1"), AspectRatio::Free);
        assert_eq!(AspectRatio::from_label(""), AspectRatio::Free);
    }

    #[test]
    fn test_zoom_scale_clamps() {
        assert_eq!(ZoomScale::new(5).percent(), 10);
        assert_eq!(ZoomScale::new(150).percent(), 150);
        assert_eq!(ZoomScale::new(1000).percent(), 300);
    }

    #[test]
    fn test_zoom_scale_factor() {
        assert_eq!(ZoomScale::new(100).as_factor(), 1.0);
        assert_eq!(ZoomScale::new(50).as_factor(), 0.5);
        assert_eq!(ZoomScale::new(300).as_factor(), 3.0);
    }

    #[test]
    fn test_zoom_scale_default() {
        let zoom = ZoomScale::default();
        assert!(zoom.is_original());
        assert_eq!(zoom.as_factor(), 1.0);
    }
}
