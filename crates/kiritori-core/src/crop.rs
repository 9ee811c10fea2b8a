//! Crop computation: mapping the on-screen crop box into source-bitmap
//! pixel space.
//!
//! The crop box lives in viewport space, positioned relative to the
//! viewport center; the displayed image lives in the same space, panned and
//! scaled around its own center. Committing a crop means undoing that
//! transform: find where the crop box lands on the working bitmap and how
//! large it is in source pixels.
//!
//! # Coordinate System
//!
//! - Viewport space: origin top-left, the crop box center is
//!   `viewport.center() + crop.offset`
//! - Source space: pixel coordinates of the working bitmap; the resulting
//!   rectangle may be fractional (the extraction step samples it)

use crate::geometry::{Rect, Viewport};
use crate::session::{CropRect, ImageTransform, MIN_CROP_SIZE};

/// Everything the extraction step needs: the source-space rectangle to
/// sample and the output dimensions to produce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropPlan {
    /// Rectangle to extract, in working-bitmap pixel units. May be
    /// fractional and may extend beyond the bitmap bounds when the image
    /// was panned away from the crop box.
    pub source: Rect,
    /// Default output width: the crop box's own pixel width.
    pub output_width: u32,
    /// Default output height: the crop box's own pixel height.
    pub output_height: u32,
}

/// Compute the source-space rectangle corresponding to the crop box.
///
/// # Arguments
///
/// * `transform` - Image pan position (center) and scale
/// * `crop` - Crop box size and center offset
/// * `viewport` - The display surface
/// * `bitmap_width`, `bitmap_height` - Working bitmap dimensions
///
/// A degenerate scale (non-finite or <= 0) falls back to 1 so the result
/// stays finite; degenerate computed dimensions collapse to the minimum
/// crop size.
pub fn compute_source_rect(
    transform: &ImageTransform,
    crop: &CropRect,
    viewport: &Viewport,
    bitmap_width: u32,
    bitmap_height: u32,
) -> Rect {
    let scale = if transform.scale.is_finite() && transform.scale > 0.0 {
        transform.scale
    } else {
        1.0
    };

    let viewport_center = viewport.center();
    let crop_center_x = viewport_center.x + crop.offset.x;
    let crop_center_y = viewport_center.y + crop.offset.y;

    // Displayed-image top-left in viewport space.
    let scaled_width = f64::from(bitmap_width) * scale;
    let scaled_height = f64::from(bitmap_height) * scale;
    let image_left = transform.position.x - scaled_width / 2.0;
    let image_top = transform.position.y - scaled_height / 2.0;

    // Crop-box top-left in viewport space.
    let crop_left = crop_center_x - crop.size.width / 2.0;
    let crop_top = crop_center_y - crop.size.height / 2.0;

    Rect::new(
        (crop_left - image_left) / scale,
        (crop_top - image_top) / scale,
        sanitize_extent(crop.size.width / scale),
        sanitize_extent(crop.size.height / scale),
    )
}

/// Compute the full crop plan: the source rectangle plus the crop box's own
/// dimensions as the default output size.
pub fn compute_crop_plan(
    transform: &ImageTransform,
    crop: &CropRect,
    viewport: &Viewport,
    bitmap_width: u32,
    bitmap_height: u32,
) -> CropPlan {
    let source = compute_source_rect(transform, crop, viewport, bitmap_width, bitmap_height);
    CropPlan {
        source,
        output_width: crop.size.width.round().max(1.0) as u32,
        output_height: crop.size.height.round().max(1.0) as u32,
    }
}

fn sanitize_extent(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        MIN_CROP_SIZE
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::geometry::{Point, Size};
    use crate::AspectRatio;
    use proptest::prelude::*;

    proptest! {
        /// Property: source dimensions equal crop dimensions divided by the
        /// scale, for any valid scale.
        #[test]
        fn prop_source_size_scales_inversely(
            crop_w in 50.0f64..=780.0,
            crop_h in 50.0f64..=580.0,
            scale in 0.1f64..=3.0,
        ) {
            let viewport = Viewport::new(800.0, 600.0);
            let transform = ImageTransform {
                position: viewport.center(),
                scale,
            };
            let crop = CropRect {
                size: Size::new(crop_w, crop_h),
                offset: Point::default(),
                aspect: AspectRatio::Free,
            };

            let rect = compute_source_rect(&transform, &crop, &viewport, 800, 600);

            prop_assert!((rect.width - crop_w / scale).abs() < 1e-9);
            prop_assert!((rect.height - crop_h / scale).abs() < 1e-9);
        }

        /// Property: the computation never produces non-finite output, even
        /// for hostile transforms.
        #[test]
        fn prop_source_rect_always_finite(
            x in -10000.0f64..=10000.0,
            y in -10000.0f64..=10000.0,
            scale in prop_oneof![
                0.1f64..=3.0,
                Just(0.0),
                Just(-1.0),
                Just(f64::NAN),
                Just(f64::INFINITY),
            ],
        ) {
            let viewport = Viewport::new(800.0, 600.0);
            let transform = ImageTransform {
                position: Point::new(x, y),
                scale,
            };
            let crop = CropRect {
                size: Size::new(300.0, 300.0),
                offset: Point::default(),
                aspect: AspectRatio::Free,
            };

            let rect = compute_source_rect(&transform, &crop, &viewport, 800, 600);

            prop_assert!(rect.x.is_finite());
            prop_assert!(rect.y.is_finite());
            prop_assert!(rect.width > 0.0);
            prop_assert!(rect.height > 0.0);
        }
    }
}
