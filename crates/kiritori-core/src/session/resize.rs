//! Aspect-ratio-constrained crop-box resizing.
//!
//! The resize algorithm is deliberately order-sensitive:
//!
//! 1. compute unconstrained width/height from the active handle's
//!    directional deltas, independently;
//! 2. if a ratio is locked, derive the secondary dimension (east/west
//!    handles make width the authority, north/south make height the
//!    authority; corners resolve through their horizontal component);
//! 3. clamp both dimensions to the minimum;
//! 4. clamp both to the viewport bound, then re-derive the secondary
//!    dimension from whichever clamp fired, picking the branch that keeps
//!    both dimensions above the minimum;
//! 5. round to the nearest integer before committing.
//!
//! Deriving the secondary dimension only after the primary delta, and again
//! after bound-clamping, keeps the final rectangle inside both the ratio
//! invariant and the bound invariant simultaneously.

use crate::geometry::{Point, Size, Viewport};
use crate::session::input::{ResizeAnchor, ResizeHandle};

/// Minimum crop-box dimension in pixels.
pub const MIN_CROP_SIZE: f64 = 50.0;
/// The crop box must stay this many pixels smaller than the viewport.
pub const CROP_BOUND_MARGIN: f64 = 20.0;
/// The crop-box center must stay this far inside the viewport half-extent.
pub const OFFSET_MARGIN: f64 = 10.0;

/// Compute the crop-box size for a resize drag.
///
/// # Arguments
///
/// * `anchor` - Pointer position and crop size captured at drag start
/// * `handle` - The handle being dragged
/// * `pointer` - Current pointer position in viewport space
/// * `ratio` - Locked width/height ratio, or `None` for free-form
/// * `viewport` - Bounding viewport
///
/// # Returns
///
/// The new crop-box size, integer-rounded, satisfying both the ratio
/// and the bound invariants.
pub fn resolve_resize(
    anchor: &ResizeAnchor,
    handle: ResizeHandle,
    pointer: Point,
    ratio: Option<f64>,
    viewport: &Viewport,
) -> Size {
    let delta_x = pointer.x - anchor.pointer.x;
    let delta_y = pointer.y - anchor.pointer.y;

    let mut width = anchor.size.width;
    let mut height = anchor.size.height;

    // East/south edges grow with positive delta, west/north with negative.
    if handle.affects_east() {
        width = (anchor.size.width + delta_x).max(MIN_CROP_SIZE);
    }
    if handle.affects_west() {
        width = (anchor.size.width - delta_x).max(MIN_CROP_SIZE);
    }
    if handle.affects_south() {
        height = (anchor.size.height + delta_y).max(MIN_CROP_SIZE);
    }
    if handle.affects_north() {
        height = (anchor.size.height - delta_y).max(MIN_CROP_SIZE);
    }

    if let Some(ratio) = ratio {
        if handle.is_horizontal() {
            height = width / ratio;
        } else {
            width = height * ratio;
        }
    }

    constrain_crop_size(Size::new(width, height), ratio, viewport)
}

/// Clamp a candidate crop-box size to the minimum and viewport bounds,
/// re-deriving the secondary dimension when a ratio is locked (steps 3-5
/// of the resize algorithm). Also used when the size comes from the UI's
/// numeric inputs or an aspect-ratio change.
pub fn constrain_crop_size(size: Size, ratio: Option<f64>, viewport: &Viewport) -> Size {
    let mut width = sanitize_dimension(size.width);
    let mut height = sanitize_dimension(size.height);

    width = width.max(MIN_CROP_SIZE);
    height = height.max(MIN_CROP_SIZE);

    width = width.min(viewport.width - CROP_BOUND_MARGIN);
    height = height.min(viewport.height - CROP_BOUND_MARGIN);

    if let Some(ratio) = ratio {
        // Re-derive from whichever bound clamp fired; width wins the tie.
        if width / ratio > height {
            width = height * ratio;
        } else {
            height = width / ratio;
        }
        // The shrinking derivation can undershoot the minimum near the
        // smallest sizes; grow the pair back from the minimum instead.
        if width < MIN_CROP_SIZE {
            width = MIN_CROP_SIZE;
            height = width / ratio;
        } else if height < MIN_CROP_SIZE {
            height = MIN_CROP_SIZE;
            width = height * ratio;
        }
    }

    Size::new(width.round(), height.round())
}

/// Clamp the crop-box offset so the rectangle center never leaves the
/// viewport half-extent minus the margin.
pub fn clamp_offset(offset: Point, viewport: &Viewport) -> Point {
    let max_x = viewport.width / 2.0 - OFFSET_MARGIN;
    let max_y = viewport.height / 2.0 - OFFSET_MARGIN;
    Point::new(offset.x.clamp(-max_x, max_x), offset.y.clamp(-max_y, max_y))
}

/// Degenerate dimensions (non-finite, or zero/negative from a bad division)
/// collapse to the minimum bound instead of propagating.
fn sanitize_dimension(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        MIN_CROP_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor(width: f64, height: f64) -> ResizeAnchor {
        ResizeAnchor {
            pointer: Point::new(400.0, 300.0),
            size: Size::new(width, height),
        }
    }

    fn viewport() -> Viewport {
        Viewport::new(800.0, 600.0)
    }

    #[test]
    fn test_east_drag_grows_width() {
        let size = resolve_resize(
            &anchor(300.0, 300.0),
            ResizeHandle::East,
            Point::new(500.0, 300.0),
            None,
            &viewport(),
        );
        assert_eq!(size, Size::new(400.0, 300.0));
    }

    #[test]
    fn test_west_drag_grows_width_with_negative_delta() {
        let size = resolve_resize(
            &anchor(300.0, 300.0),
            ResizeHandle::West,
            Point::new(320.0, 300.0),
            None,
            &viewport(),
        );
        assert_eq!(size, Size::new(380.0, 300.0));
    }

    #[test]
    fn test_north_drag_grows_height_with_negative_delta() {
        let size = resolve_resize(
            &anchor(300.0, 300.0),
            ResizeHandle::North,
            Point::new(400.0, 250.0),
            None,
            &viewport(),
        );
        assert_eq!(size, Size::new(300.0, 350.0));
    }

    #[test]
    fn test_corner_drag_changes_both_dimensions() {
        let size = resolve_resize(
            &anchor(300.0, 300.0),
            ResizeHandle::SouthEast,
            Point::new(450.0, 380.0),
            None,
            &viewport(),
        );
        assert_eq!(size, Size::new(450.0, 380.0));
    }

    #[test]
    fn test_minimum_size_clamp() {
        let size = resolve_resize(
            &anchor(300.0, 300.0),
            ResizeHandle::SouthEast,
            Point::new(0.0, 0.0),
            None,
            &viewport(),
        );
        assert_eq!(size, Size::new(50.0, 50.0));
    }

    #[test]
    fn test_viewport_bound_clamp() {
        let size = resolve_resize(
            &anchor(300.0, 300.0),
            ResizeHandle::SouthEast,
            Point::new(2000.0, 2000.0),
            None,
            &viewport(),
        );
        // 800 - 20 = 780, 600 - 20 = 580
        assert_eq!(size, Size::new(780.0, 580.0));
    }

    #[test]
    fn test_locked_east_drag_sixteen_nine() {
        // East +100 from a 300x300 box at 16:9 -> 400x225.
        let size = resolve_resize(
            &anchor(300.0, 300.0),
            ResizeHandle::East,
            Point::new(500.0, 300.0),
            Some(16.0 / 9.0),
            &viewport(),
        );
        assert_eq!(size, Size::new(400.0, 225.0));
    }

    #[test]
    fn test_locked_south_drag_derives_width() {
        // South handle makes height the authority: height 400 at 4:3
        // derives width 533.
        let size = resolve_resize(
            &anchor(300.0, 300.0),
            ResizeHandle::South,
            Point::new(400.0, 400.0),
            Some(4.0 / 3.0),
            &viewport(),
        );
        assert_eq!(size, Size::new(533.0, 400.0));
    }

    #[test]
    fn test_locked_corner_resolves_through_width() {
        let size = resolve_resize(
            &anchor(300.0, 300.0),
            ResizeHandle::SouthEast,
            Point::new(500.0, 310.0),
            Some(1.0),
            &viewport(),
        );
        // Horizontal component wins: width 400 drives height 400.
        assert_eq!(size, Size::new(400.0, 400.0));
    }

    #[test]
    fn test_locked_min_clamp_keeps_both_above_minimum() {
        // East dragged far past the left edge at 16:9: the width bottoms
        // out at the minimum and the height re-derives upward from it
        // rather than below it.
        let size = resolve_resize(
            &anchor(300.0, 169.0),
            ResizeHandle::East,
            Point::new(-500.0, 300.0),
            Some(16.0 / 9.0),
            &viewport(),
        );
        assert_eq!(size, Size::new(89.0, 50.0));
        assert!(size.height >= MIN_CROP_SIZE);
    }

    #[test]
    fn test_locked_min_clamp_portrait_ratio() {
        // The mirrored case: south dragged far up at 9:16, height bottoms
        // out and the width re-grows from the minimum.
        let size = resolve_resize(
            &anchor(169.0, 300.0),
            ResizeHandle::South,
            Point::new(400.0, -500.0),
            Some(9.0 / 16.0),
            &viewport(),
        );
        assert_eq!(size, Size::new(50.0, 89.0));
        assert!(size.width >= MIN_CROP_SIZE);
    }

    #[test]
    fn test_locked_bound_clamp_re_derives() {
        // Dragging far east at 1:1 in an 800x600 viewport: height clamps to
        // 580 first, and the re-derivation pulls width back to match.
        let size = resolve_resize(
            &anchor(300.0, 300.0),
            ResizeHandle::East,
            Point::new(2000.0, 300.0),
            Some(1.0),
            &viewport(),
        );
        assert_eq!(size, Size::new(580.0, 580.0));
    }

    #[test]
    fn test_constrain_rejects_non_finite() {
        let size = constrain_crop_size(Size::new(f64::NAN, f64::INFINITY), None, &viewport());
        assert_eq!(size, Size::new(50.0, 50.0));
    }

    #[test]
    fn test_constrain_rejects_non_positive() {
        let size = constrain_crop_size(Size::new(-10.0, 0.0), None, &viewport());
        assert_eq!(size, Size::new(50.0, 50.0));
    }

    #[test]
    fn test_clamp_offset_within_bounds() {
        let offset = clamp_offset(Point::new(100.0, -50.0), &viewport());
        assert_eq!(offset, Point::new(100.0, -50.0));
    }

    #[test]
    fn test_clamp_offset_far_drag() {
        // (10000, 10000) in 800x600 clamps to (390, 290).
        let offset = clamp_offset(Point::new(10000.0, 10000.0), &viewport());
        assert_eq!(offset, Point::new(390.0, 290.0));
    }

    #[test]
    fn test_clamp_offset_negative() {
        let offset = clamp_offset(Point::new(-10000.0, -10000.0), &viewport());
        assert_eq!(offset, Point::new(-390.0, -290.0));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
